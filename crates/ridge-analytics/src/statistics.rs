//! 수익률 요약 통계 계산.
//!
//! 자산별로 다음을 계산합니다:
//! - 표본 평균
//! - 표본 표준편차 (n - 1로 나눔)
//! - 80% 중앙 구간 폭 (90분위수 - 10분위수, 선형 보간)

use ridge_core::{AssetStatistics, ReturnsTable, RidgeError, RidgeResult};
use tracing::debug;

/// 하위 분위 (퍼센트)
pub const LOWER_PERCENTILE: f64 = 10.0;
/// 상위 분위 (퍼센트)
pub const UPPER_PERCENTILE: f64 = 90.0;

/// 자산별 요약 통계 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// 새 계산기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 한 자산의 통계를 계산합니다.
    ///
    /// # 인자
    ///
    /// * `asset_id` - 자산 식별자
    /// * `returns` - 결측치가 제거된 수익률 시계열
    ///
    /// # 에러
    ///
    /// 시계열이 비어 있으면 `EmptySeries`, 유한하지 않은 값이 있으면 `InvalidInput`.
    /// 관측치가 하나뿐이면 표준편차와 폭은 0입니다.
    pub fn calculate(&self, asset_id: &str, returns: &[f64]) -> RidgeResult<AssetStatistics> {
        ensure_usable(asset_id, returns)?;

        let mean = mean(returns);
        let std_dev = sample_std_dev(returns, mean);

        let mut sorted = returns.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let width80 = percentile_sorted(&sorted, UPPER_PERCENTILE)
            - percentile_sorted(&sorted, LOWER_PERCENTILE);

        debug!(asset = asset_id, n = returns.len(), mean, std_dev, width80, "Statistics computed");

        Ok(AssetStatistics {
            asset_id: asset_id.to_string(),
            mean,
            std_dev,
            width80,
        })
    }

    /// 테이블의 모든 자산 통계를 열 순서대로 계산합니다.
    pub fn calculate_all(&self, table: &ReturnsTable) -> RidgeResult<Vec<AssetStatistics>> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let _span = ridge_core::asset_span!("statistics", series.asset_id, index).entered();
                self.calculate(&series.asset_id, &series.returns)
            })
            .collect()
    }
}

/// 빈 시계열과 비유한 값을 거부합니다.
pub(crate) fn ensure_usable(asset_id: &str, values: &[f64]) -> RidgeResult<()> {
    if values.is_empty() {
        return Err(RidgeError::EmptySeries {
            asset: asset_id.to_string(),
        });
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(RidgeError::InvalidInput(format!(
            "{}: non-finite value at row {}",
            asset_id, pos
        )));
    }
    Ok(())
}

/// 산술 평균. 빈 슬라이스는 NaN.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// 표본 표준편차 (ddof = 1). 관측치가 2개 미만이면 0.
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// 선형 보간 분위수.
///
/// 순위 `p / 100 * (n - 1)`의 양쪽 값을 보간합니다. 빈 슬라이스는 `None`.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(percentile_sorted(&sorted, p))
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f64; 5] = [0.01, -0.02, 0.03, -0.01, 0.02];
    const B: [f64; 5] = [0.05, -0.05, 0.04, -0.04, 0.0];

    #[test]
    fn test_percentile_linear() {
        let vals = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert!((percentile(&vals, 50.0).unwrap() - 5.5).abs() < 1e-12);
        assert!((percentile(&vals, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((percentile(&vals, 100.0).unwrap() - 10.0).abs() < 1e-12);
        assert!((percentile(&vals, 10.0).unwrap() - 1.9).abs() < 1e-12);
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn test_statistics_asset_a() {
        let stats = StatisticsCalculator::new().calculate("A", &A).unwrap();

        assert_eq!(stats.asset_id, "A");
        assert!((stats.mean - 0.006).abs() < 1e-12);
        // 편차 제곱합 0.00172 / 4
        assert!((stats.std_dev - 0.00043f64.sqrt()).abs() < 1e-12);
        // p90 = 0.026, p10 = -0.016
        assert!((stats.width80 - 0.042).abs() < 1e-12);
        assert_eq!(stats.table_row(), ["A", "0.01", "0.02", "0.04"]);
    }

    #[test]
    fn test_statistics_asset_b() {
        let stats = StatisticsCalculator::new().calculate("B", &B).unwrap();

        assert!(stats.mean.abs() < 1e-12);
        assert!((stats.std_dev - 0.00205f64.sqrt()).abs() < 1e-12);
        // p90 = 0.046, p10 = -0.046
        assert!((stats.width80 - 0.092).abs() < 1e-12);
    }

    #[test]
    fn test_empty_series_is_error() {
        let result = StatisticsCalculator::new().calculate("EMPTY", &[]);
        match result {
            Err(RidgeError::EmptySeries { asset }) => assert_eq!(asset, "EMPTY"),
            other => panic!("expected EmptySeries, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = StatisticsCalculator::new().calculate("X", &[0.01, f64::NAN]);
        assert!(matches!(result, Err(RidgeError::InvalidInput(_))));
    }

    #[test]
    fn test_single_observation() {
        let stats = StatisticsCalculator::new().calculate("ONE", &[0.03]).unwrap();
        assert_eq!(stats.mean, 0.03);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.width80, 0.0);
    }

    #[test]
    fn test_calculate_all_preserves_order() {
        let table = ReturnsTable::new()
            .with_column("B", B.to_vec())
            .unwrap()
            .with_column("A", A.to_vec())
            .unwrap();

        let all = StatisticsCalculator::new().calculate_all(&table).unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_calculate_all_fails_on_any_empty_column() {
        let table = ReturnsTable::new()
            .with_column("A", A.to_vec())
            .unwrap()
            .with_column("E", vec![])
            .unwrap();

        assert!(matches!(
            StatisticsCalculator::new().calculate_all(&table),
            Err(RidgeError::EmptySeries { .. })
        ));
    }
}
