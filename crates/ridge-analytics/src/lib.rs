//! 수익률 분포 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 자산별 요약 통계 (평균, 표준편차, 80% 구간 폭)
//! - 가우시안 커널 밀도 추정
//! - 릿지 플롯용 수직 배치
//!
//! # 예시
//!
//! ```rust,ignore
//! use ridge_analytics::{DensityEstimator, RidgeLayoutEngine, StatisticsCalculator};
//!
//! let stats = StatisticsCalculator::new().calculate_all(&table)?;
//! let curves = DensityEstimator::new().estimate_all(&table)?;
//! let layout = RidgeLayoutEngine::new(0.5)?.layout(curves);
//! ```

pub mod density;
pub mod layout;
pub mod statistics;

pub use density::{DensityEstimator, DensityParams, DEFAULT_BW_ADJUST, DEFAULT_CLIP, DEFAULT_GRID_SIZE};
pub use layout::RidgeLayoutEngine;
pub use statistics::{percentile, StatisticsCalculator};
