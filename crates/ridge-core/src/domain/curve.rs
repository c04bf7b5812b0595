//! 밀도 곡선과 릿지 배치 결과.

use serde::{Deserialize, Serialize};

/// 고정 구간에서 샘플링된 확률 밀도 곡선.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    /// 자산 식별자
    pub asset_id: String,
    /// 평가 지점 (오름차순)
    pub x: Vec<f64>,
    /// 밀도 값
    pub y: Vec<f64>,
    /// 사용된 커널 대역폭
    pub bandwidth: f64,
}

impl DensityCurve {
    /// 샘플 수.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 샘플이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// 기준선만큼 위로 이동된 밀도 곡선.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCurve {
    /// 자산 식별자
    pub asset_id: String,
    /// 입력 순서상 위치 (0부터)
    pub index: usize,
    /// 시각적 0선 (`index * y_spacing`)
    pub baseline: f64,
    /// 평가 지점
    pub x: Vec<f64>,
    /// 이동된 밀도 값 (`density + baseline`)
    pub y: Vec<f64>,
}

impl LayoutCurve {
    /// `(x, y)` 좌표 쌍.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// 축 눈금 (위치 + 라벨).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// 데이터 좌표상 위치
    pub position: f64,
    /// 표시 라벨
    pub label: String,
}

/// 릿지 배치 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeLayout {
    /// 곡선 간 수직 간격
    pub y_spacing: f64,
    /// 입력 순서대로 배치된 곡선
    pub curves: Vec<LayoutCurve>,
    /// y축 눈금 (기준선 위치, 자산 식별자)
    pub ticks: Vec<AxisTick>,
}

impl RidgeLayout {
    /// 전체 x 범위 `(min, max)`.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for curve in &self.curves {
            for &x in &curve.x {
                min_v = min_v.min(x);
                max_v = max_v.max(x);
            }
        }
        if min_v.is_finite() && max_v.is_finite() {
            Some((min_v, max_v))
        } else {
            None
        }
    }

    /// 이동된 곡선 전체의 최대 y 값.
    pub fn y_max(&self) -> f64 {
        self.curves
            .iter()
            .flat_map(|c| c.y.iter().copied())
            .fold(0.0, f64::max)
    }
}
