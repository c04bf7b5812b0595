//! 릿지 플롯 파이프라인의 에러 타입.
//!
//! 모든 에러는 결정적입니다. 같은 입력과 환경이면 같은 에러가 발생하므로
//! 재시도 개념이 없고, 발생 즉시 호출자에게 전파됩니다.

use std::path::PathBuf;

use thiserror::Error;

/// 파이프라인 에러.
#[derive(Debug, Error)]
pub enum RidgeError {
    /// 수익률 테이블 소스가 존재하지 않음
    #[error("입력 파일을 찾을 수 없음: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 자산의 수익률 시계열이 비어 있음
    #[error("빈 시계열: {asset}")]
    EmptySeries { asset: String },

    /// 밀도 추정이 불가능한 시계열 (관측치 1개, 분산 0 등)
    #[error("밀도 추정 불가 ({asset}): {reason}")]
    DegenerateSeries { asset: String, reason: String },

    /// 곡선 간 수직 간격이 양수가 아님
    #[error("잘못된 y 간격: {0} (0보다 큰 유한한 값이어야 합니다)")]
    InvalidSpacing(f64),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 이미지 내보내기 실패
    #[error("내보내기 에러 ({}): {reason}", .path.display())]
    Export { path: PathBuf, reason: String },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 파이프라인 작업을 위한 Result 타입.
pub type RidgeResult<T> = Result<T, RidgeError>;

impl RidgeError {
    /// 내보내기 에러를 생성합니다.
    pub fn export(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RidgeError::Export {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// 출력 단계 에러인지 확인합니다.
    pub fn is_export_error(&self) -> bool {
        matches!(self, RidgeError::Export { .. })
    }
}

impl From<config::ConfigError> for RidgeError {
    fn from(err: config::ConfigError) -> Self {
        RidgeError::Config(err.to_string())
    }
}
