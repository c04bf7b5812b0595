//! 가우시안 커널 밀도 추정 (KDE).
//!
//! 대역폭은 Scott 규칙(`n^(-1/5) * 표본 표준편차`)에 고정 배수 1.5를 곱해
//! 구합니다. 평가 격자는 데이터 범위를 양쪽으로 대역폭의 3배만큼 넓힌 뒤
//! 고정 구간 `[-5, 5]`로 잘라낸 200개 지점입니다.
//!
//! 자르기 구간은 입력 단위와 무관하게 고정입니다. 소수 수익률(0.01 수준)이면
//! 잘라내기가 거의 적용되지 않고, 퍼센트 포인트 수익률이면 꼬리가 잘릴 수 있습니다.
//!
//! 결과는 순수 함수로 계산되며 결정적입니다 (같은 입력이면 비트 단위로 같은 출력).

use ridge_core::{DensityCurve, ReturnsTable, RidgeError, RidgeResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::statistics::{ensure_usable, mean, sample_std_dev};

/// 평가 지점 수
pub const DEFAULT_GRID_SIZE: usize = 200;
/// 기본 대역폭 대비 배수
pub const DEFAULT_BW_ADJUST: f64 = 1.5;
/// 데이터 범위 바깥으로 확장할 대역폭 배수
pub const DEFAULT_CUT: f64 = 3.0;
/// 고정 자르기 구간
pub const DEFAULT_CLIP: (f64, f64) = (-5.0, 5.0);

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// KDE 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityParams {
    /// 평가 지점 수
    pub grid_size: usize,
    /// 대역폭 배수
    pub bw_adjust: f64,
    /// 데이터 범위 확장 (대역폭 단위)
    pub cut: f64,
    /// 평가 구간 하한/상한
    pub clip: (f64, f64),
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            bw_adjust: DEFAULT_BW_ADJUST,
            cut: DEFAULT_CUT,
            clip: DEFAULT_CLIP,
        }
    }
}

/// 커널 밀도 추정기.
#[derive(Debug, Clone, Default)]
pub struct DensityEstimator {
    params: DensityParams,
}

impl DensityEstimator {
    /// 기본 파라미터로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 파라미터를 지정하여 생성합니다.
    pub fn with_params(params: DensityParams) -> RidgeResult<Self> {
        if params.grid_size < 2 {
            return Err(RidgeError::InvalidInput(format!(
                "grid_size must be at least 2, got {}",
                params.grid_size
            )));
        }
        if !(params.bw_adjust.is_finite() && params.bw_adjust > 0.0) {
            return Err(RidgeError::InvalidInput(format!(
                "bw_adjust must be positive, got {}",
                params.bw_adjust
            )));
        }
        if !(params.clip.0 < params.clip.1) || params.cut < 0.0 {
            return Err(RidgeError::InvalidInput(format!(
                "invalid density domain: clip={:?}, cut={}",
                params.clip, params.cut
            )));
        }
        Ok(Self { params })
    }

    /// 사용 중인 파라미터.
    pub fn params(&self) -> &DensityParams {
        &self.params
    }

    /// Scott 규칙 대역폭에 배수를 적용한 값.
    pub fn bandwidth(&self, returns: &[f64]) -> f64 {
        let n = returns.len() as f64;
        let sigma = sample_std_dev(returns, mean(returns));
        self.params.bw_adjust * n.powf(-0.2) * sigma
    }

    /// 한 자산의 밀도 곡선을 추정합니다.
    ///
    /// # 에러
    ///
    /// - 빈 시계열: `EmptySeries`
    /// - 관측치 2개 미만, 분산 0, 데이터 전체가 자르기 구간 밖: `DegenerateSeries`
    pub fn estimate(&self, asset_id: &str, returns: &[f64]) -> RidgeResult<DensityCurve> {
        ensure_usable(asset_id, returns)?;

        if returns.len() < 2 {
            return Err(degenerate(asset_id, "at least two observations are required"));
        }

        let bandwidth = self.bandwidth(returns);
        let constant = returns.iter().all(|&v| v == returns[0]);
        if constant || !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(degenerate(asset_id, "series has zero variance"));
        }

        let (data_min, data_max) = returns
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let (clip_lo, clip_hi) = self.params.clip;
        let lo = (data_min - self.params.cut * bandwidth).max(clip_lo);
        let hi = (data_max + self.params.cut * bandwidth).min(clip_hi);
        if lo >= hi {
            return Err(degenerate(
                asset_id,
                &format!("support lies outside the clip domain [{}, {}]", clip_lo, clip_hi),
            ));
        }

        let x = linspace(lo, hi, self.params.grid_size);
        let norm = INV_SQRT_2PI / (returns.len() as f64 * bandwidth);
        let y = x
            .iter()
            .map(|&xi| {
                let sum: f64 = returns
                    .iter()
                    .map(|&r| {
                        let z = (xi - r) / bandwidth;
                        (-0.5 * z * z).exp()
                    })
                    .sum();
                sum * norm
            })
            .collect();

        debug!(asset = asset_id, bandwidth, lo, hi, "Density estimated");

        Ok(DensityCurve {
            asset_id: asset_id.to_string(),
            x,
            y,
            bandwidth,
        })
    }

    /// 테이블의 모든 자산 밀도 곡선을 열 순서대로 추정합니다.
    pub fn estimate_all(&self, table: &ReturnsTable) -> RidgeResult<Vec<DensityCurve>> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let _span = ridge_core::asset_span!("density", series.asset_id, index).entered();
                self.estimate(&series.asset_id, &series.returns)
            })
            .collect()
    }
}

fn degenerate(asset_id: &str, reason: &str) -> RidgeError {
    RidgeError::DegenerateSeries {
        asset: asset_id.to_string(),
        reason: reason.to_string(),
    }
}

/// 양 끝점을 포함하는 등간격 지점.
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
        x.windows(2)
            .zip(y.windows(2))
            .map(|(xw, yw)| (xw[1] - xw[0]) * (yw[0] + yw[1]) / 2.0)
            .sum()
    }

    fn sample_returns() -> Vec<f64> {
        (0..250)
            .map(|i| ((i as f64) * 0.37).sin() * 0.02 + ((i as f64) * 1.3).cos() * 0.005)
            .collect()
    }

    #[test]
    fn test_grid_size_and_domain() {
        let returns = sample_returns();
        let curve = DensityEstimator::new().estimate("SPY", &returns).unwrap();

        assert_eq!(curve.x.len(), DEFAULT_GRID_SIZE);
        assert_eq!(curve.y.len(), DEFAULT_GRID_SIZE);
        assert!(curve.x.iter().all(|&x| (-5.0..=5.0).contains(&x)));
        assert!(curve.x.windows(2).all(|w| w[0] < w[1]));
        assert!(curve.y.iter().all(|&y| y >= 0.0 && y.is_finite()));
    }

    #[test]
    fn test_density_integrates_to_one_when_unclipped() {
        let returns = sample_returns();
        let curve = DensityEstimator::new().estimate("SPY", &returns).unwrap();
        let area = trapezoid(&curve.x, &curve.y);
        assert!((area - 1.0).abs() < 0.01, "area = {}", area);
    }

    #[test]
    fn test_bandwidth_scott_with_adjust() {
        let returns = vec![0.05, -0.05, 0.04, -0.04, 0.0];
        let estimator = DensityEstimator::new();
        let expected = 1.5 * 5f64.powf(-0.2) * 0.00205f64.sqrt();
        assert!((estimator.bandwidth(&returns) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_wide_data_is_clipped() {
        let returns = vec![-12.0, -6.0, -1.0, 0.0, 2.0, 7.0, 11.0];
        let curve = DensityEstimator::new().estimate("WIDE", &returns).unwrap();

        assert_eq!(curve.x.first().copied(), Some(-5.0));
        assert_eq!(curve.x.last().copied(), Some(5.0));
    }

    #[test]
    fn test_symmetric_input_gives_symmetric_curve() {
        let returns = vec![-0.03, -0.01, 0.0, 0.01, 0.03];
        let curve = DensityEstimator::new().estimate("SYM", &returns).unwrap();
        let n = curve.y.len();
        for i in 0..n / 2 {
            assert!((curve.y[i] - curve.y[n - 1 - i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let returns = sample_returns();
        let estimator = DensityEstimator::new();
        let a = estimator.estimate("X", &returns).unwrap();
        let b = estimator.estimate("X", &returns).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_inputs() {
        let estimator = DensityEstimator::new();

        assert!(matches!(
            estimator.estimate("E", &[]),
            Err(RidgeError::EmptySeries { .. })
        ));
        assert!(matches!(
            estimator.estimate("ONE", &[0.01]),
            Err(RidgeError::DegenerateSeries { .. })
        ));
        assert!(matches!(
            estimator.estimate("FLAT", &[0.01, 0.01, 0.01]),
            Err(RidgeError::DegenerateSeries { .. })
        ));
        assert!(matches!(
            estimator.estimate("FAR", &[100.0, 101.0, 102.0]),
            Err(RidgeError::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn test_invalid_params() {
        let params = DensityParams {
            grid_size: 1,
            ..Default::default()
        };
        assert!(DensityEstimator::with_params(params).is_err());

        let params = DensityParams {
            clip: (1.0, -1.0),
            ..Default::default()
        };
        assert!(DensityEstimator::with_params(params).is_err());
    }
}
