//! 릿지 수직 배치.
//!
//! `i`번째 자산(입력 열 순서, 0부터)의 곡선을 `i * y_spacing`만큼 위로 올리고
//! 그 높이를 기준선으로 삼습니다. 정렬은 하지 않습니다.

use ridge_core::{AxisTick, DensityCurve, LayoutCurve, RidgeError, RidgeLayout, RidgeResult};
use tracing::debug;

/// 릿지 배치 엔진.
#[derive(Debug, Clone, Copy)]
pub struct RidgeLayoutEngine {
    y_spacing: f64,
}

impl RidgeLayoutEngine {
    /// 수직 간격을 지정하여 생성합니다.
    ///
    /// 0 이하이거나 유한하지 않은 간격은 `InvalidSpacing`으로 거부합니다.
    /// 간격 0은 모든 곡선이 같은 기준선에 겹쳐 구분이 불가능해집니다.
    pub fn new(y_spacing: f64) -> RidgeResult<Self> {
        if !y_spacing.is_finite() || y_spacing <= 0.0 {
            return Err(RidgeError::InvalidSpacing(y_spacing));
        }
        Ok(Self { y_spacing })
    }

    /// 수직 간격.
    pub fn y_spacing(&self) -> f64 {
        self.y_spacing
    }

    /// `index`번째 자산의 기준선.
    pub fn baseline(&self, index: usize) -> f64 {
        index as f64 * self.y_spacing
    }

    /// 밀도 곡선들을 입력 순서대로 배치합니다.
    pub fn layout(&self, curves: Vec<DensityCurve>) -> RidgeLayout {
        let curves: Vec<LayoutCurve> = curves
            .into_iter()
            .enumerate()
            .map(|(index, curve)| {
                let baseline = self.baseline(index);
                LayoutCurve {
                    asset_id: curve.asset_id,
                    index,
                    baseline,
                    y: curve.y.iter().map(|y| y + baseline).collect(),
                    x: curve.x,
                }
            })
            .collect();

        let ticks = curves
            .iter()
            .map(|c| AxisTick {
                position: c.baseline,
                label: c.asset_id.clone(),
            })
            .collect();

        debug!(
            assets = curves.len(),
            y_spacing = self.y_spacing,
            "Ridge layout computed"
        );

        RidgeLayout {
            y_spacing: self.y_spacing,
            curves,
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(asset: &str, peak: f64) -> DensityCurve {
        DensityCurve {
            asset_id: asset.to_string(),
            x: vec![-1.0, 0.0, 1.0],
            y: vec![0.0, peak, 0.0],
            bandwidth: 0.1,
        }
    }

    #[test]
    fn test_zero_spacing_rejected() {
        assert!(matches!(
            RidgeLayoutEngine::new(0.0),
            Err(RidgeError::InvalidSpacing(v)) if v == 0.0
        ));
        assert!(RidgeLayoutEngine::new(-0.5).is_err());
        assert!(RidgeLayoutEngine::new(f64::INFINITY).is_err());
        assert!(RidgeLayoutEngine::new(f64::NAN).is_err());
    }

    #[test]
    fn test_shift_and_baselines() {
        let engine = RidgeLayoutEngine::new(0.5).unwrap();
        let layout = engine.layout(vec![curve("A", 2.0), curve("B", 3.0), curve("C", 1.0)]);

        let baselines: Vec<f64> = layout.curves.iter().map(|c| c.baseline).collect();
        assert_eq!(baselines, vec![0.0, 0.5, 1.0]);
        assert_eq!(layout.curves[1].y, vec![0.5, 3.5, 0.5]);
        assert_eq!(layout.curves[2].x, vec![-1.0, 0.0, 1.0]);
        assert_eq!(layout.curves[2].index, 2);
    }

    #[test]
    fn test_ticks_follow_input_order() {
        let engine = RidgeLayoutEngine::new(1.5).unwrap();
        // 봉우리 크기와 무관하게 입력 순서 유지
        let layout = engine.layout(vec![curve("Z", 9.0), curve("A", 0.1), curve("M", 4.0)]);

        let labels: Vec<_> = layout.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Z", "A", "M"]);
        let positions: Vec<_> = layout.ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_empty_layout() {
        let layout = RidgeLayoutEngine::new(0.5).unwrap().layout(Vec::new());
        assert!(layout.curves.is_empty());
        assert!(layout.ticks.is_empty());
        assert!(layout.x_extent().is_none());
    }
}
