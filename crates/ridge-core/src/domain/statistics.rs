//! 자산별 요약 통계.

use serde::{Deserialize, Serialize};

/// 통계 테이블 헤더 (열 순서 고정).
pub const STATISTICS_HEADERS: [&str; 4] = ["Stock", "Mean", "Std Dev", "Width"];

/// 자산별 요약 통계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    /// 자산 식별자
    pub asset_id: String,
    /// 표본 평균
    pub mean: f64,
    /// 표본 표준편차 (ddof = 1)
    pub std_dev: f64,
    /// 90분위수 - 10분위수
    pub width80: f64,
}

impl AssetStatistics {
    /// 표시용 테이블 행 `[Stock, Mean, Std Dev, Width]` (소수점 둘째 자리).
    pub fn table_row(&self) -> [String; 4] {
        [
            self.asset_id.clone(),
            format!("{:.2}", self.mean),
            format!("{:.2}", self.std_dev),
            format!("{:.2}", self.width80),
        ]
    }
}
