//! 수익률 테이블.
//!
//! 열 = 자산 식별자, 행 = 거래일, 값 = 소수 수익률.
//! 열 순서는 삽입 순서이며 통계 테이블 행, 곡선 적층 순서, 축 라벨까지
//! 그대로 유지됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RidgeError, RidgeResult};

/// 한 자산의 수익률 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSeries {
    /// 자산 식별자 (티커)
    pub asset_id: String,
    /// 일간 수익률 (시간순)
    pub returns: Vec<f64>,
}

/// 순서가 보존되는 자산별 수익률 테이블.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsTable {
    /// 행 날짜 (오름차순). 비어 있을 수 있습니다.
    dates: Vec<NaiveDate>,
    columns: Vec<AssetSeries>,
}

impl ReturnsTable {
    /// 빈 테이블을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 행 날짜와 함께 테이블을 생성합니다.
    pub fn with_dates(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    /// 열을 추가합니다.
    ///
    /// 중복된 자산 식별자는 거부합니다. 날짜가 있는 테이블이면
    /// 시계열 길이가 행 수와 같아야 합니다.
    pub fn push_column(
        &mut self,
        asset_id: impl Into<String>,
        returns: Vec<f64>,
    ) -> RidgeResult<()> {
        let asset_id = asset_id.into();

        if asset_id.trim().is_empty() {
            return Err(RidgeError::InvalidInput(
                "asset identifier must not be empty".to_string(),
            ));
        }

        if self.columns.iter().any(|c| c.asset_id == asset_id) {
            return Err(RidgeError::InvalidInput(format!(
                "duplicate asset column: {}",
                asset_id
            )));
        }

        if !self.dates.is_empty() && returns.len() != self.dates.len() {
            return Err(RidgeError::InvalidInput(format!(
                "column {} has {} values but table has {} rows",
                asset_id,
                returns.len(),
                self.dates.len()
            )));
        }

        self.columns.push(AssetSeries { asset_id, returns });
        Ok(())
    }

    /// 열을 추가한 테이블을 반환합니다 (빌더 형태).
    pub fn with_column(
        mut self,
        asset_id: impl Into<String>,
        returns: Vec<f64>,
    ) -> RidgeResult<Self> {
        self.push_column(asset_id, returns)?;
        Ok(self)
    }

    /// 열 목록 (입력 순서).
    pub fn columns(&self) -> &[AssetSeries] {
        &self.columns
    }

    /// 자산 식별자 목록 (입력 순서).
    pub fn asset_ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.asset_id.as_str()).collect()
    }

    /// 자산 식별자로 시계열을 찾습니다.
    pub fn get(&self, asset_id: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.asset_id == asset_id)
            .map(|c| c.returns.as_slice())
    }

    /// 행 날짜.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 자산 수.
    pub fn num_assets(&self) -> usize {
        self.columns.len()
    }

    /// 행 수 (가장 긴 열 기준).
    pub fn num_rows(&self) -> usize {
        if !self.dates.is_empty() {
            return self.dates.len();
        }
        self.columns
            .iter()
            .map(|c| c.returns.len())
            .max()
            .unwrap_or(0)
    }

    /// 자산이 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_preserved() {
        let table = ReturnsTable::new()
            .with_column("TSLA", vec![0.01])
            .unwrap()
            .with_column("AAPL", vec![0.02])
            .unwrap()
            .with_column("MSFT", vec![0.03])
            .unwrap();

        assert_eq!(table.asset_ids(), vec!["TSLA", "AAPL", "MSFT"]);
        assert_eq!(table.num_assets(), 3);
        assert_eq!(table.get("AAPL"), Some(&[0.02][..]));
        assert!(table.get("GOOG").is_none());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = ReturnsTable::new();
        table.push_column("SPY", vec![0.01]).unwrap();
        let result = table.push_column("SPY", vec![0.02]);
        assert!(matches!(result, Err(RidgeError::InvalidInput(_))));
    }

    #[test]
    fn test_length_must_match_dates() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        ];
        let mut table = ReturnsTable::with_dates(dates);
        assert!(table.push_column("SPY", vec![0.01, 0.02]).is_ok());
        assert!(table.push_column("QQQ", vec![0.01]).is_err());
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_blank_asset_id_rejected() {
        let mut table = ReturnsTable::new();
        assert!(table.push_column("  ", vec![0.01]).is_err());
    }
}
