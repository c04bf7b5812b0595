//! 데이터 모듈 오류 타입.

use ridge_core::RidgeError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 외부 소스가 보고한 오류
    #[error("Provider error ({code}): {description}")]
    ProviderError { code: String, description: String },

    /// 심볼에 대한 데이터 없음
    #[error("No data for symbol: {0}")]
    NoData(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 파일 입출력 오류
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// 데이터 작업 Result 타입.
pub type DataResult<T> = Result<T, DataError>;

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::StorageError(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::StorageError(err.to_string())
    }
}

impl From<DataError> for RidgeError {
    fn from(err: DataError) -> Self {
        RidgeError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DataError::ProviderError {
            code: "Not Found".to_string(),
            description: "No data found, symbol may be delisted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error (Not Found): No data found, symbol may be delisted"
        );
    }

    #[test]
    fn test_into_ridge_error() {
        let err: RidgeError = DataError::NoData("XYZ".to_string()).into();
        assert!(matches!(err, RidgeError::InvalidInput(ref msg) if msg.contains("XYZ")));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(DataError::from(json_err), DataError::ParseError(_)));
    }
}
