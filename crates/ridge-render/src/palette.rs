//! 순차형 색상 팔레트.
//!
//! 지각적으로 균일한 viridis 색상표를 9개 기준점 사이 선형 보간으로 구현합니다.
//! 자산 `index`의 색은 `(index + 1) / (total + 1)` 위치에서 샘플링하여
//! 양 끝의 너무 어둡거나 밝은 색을 피합니다.

use serde::{Deserialize, Serialize};

/// 8비트 RGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// viridis 기준점 (0.0, 0.125, ..., 1.0)
const VIRIDIS_STOPS: [Rgb; 9] = [
    Rgb::new(68, 1, 84),
    Rgb::new(72, 40, 120),
    Rgb::new(62, 73, 137),
    Rgb::new(49, 104, 142),
    Rgb::new(38, 130, 142),
    Rgb::new(31, 158, 137),
    Rgb::new(53, 183, 121),
    Rgb::new(110, 206, 88),
    Rgb::new(253, 231, 37),
];

/// 연속 위치 `t ∈ [0, 1]`의 viridis 색상.
pub fn viridis(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = (VIRIDIS_STOPS.len() - 1) as f64;
    let pos = t * segments;
    let lo = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    let frac = pos - lo as f64;

    let a = VIRIDIS_STOPS[lo];
    let b = VIRIDIS_STOPS[lo + 1];
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;

    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

/// `total`개 자산 중 `index`번째 자산의 색상.
pub fn color(index: usize, total: usize) -> Rgb {
    let total = total.max(1);
    let index = index.min(total - 1);
    viridis((index + 1) as f64 / (total + 1) as f64)
}
