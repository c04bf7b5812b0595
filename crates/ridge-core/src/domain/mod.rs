//! 도메인 모델.
//!
//! - [`ReturnsTable`]: 자산별 일간 수익률 (입력)
//! - [`AssetStatistics`]: 자산별 요약 통계
//! - [`DensityCurve`], [`LayoutCurve`], [`RidgeLayout`]: 밀도 곡선과 수직 배치

pub mod curve;
pub mod returns_table;
pub mod statistics;

pub use curve::{AxisTick, DensityCurve, LayoutCurve, RidgeLayout};
pub use returns_table::{AssetSeries, ReturnsTable};
pub use statistics::{AssetStatistics, STATISTICS_HEADERS};
