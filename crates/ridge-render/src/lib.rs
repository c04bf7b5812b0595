//! 릿지 플롯 구성과 이미지 출력.
//!
//! - [`composer`]: 배치된 곡선과 통계로 장면 구성
//! - [`exporter`]: PNG/SVG 파일 기록
//! - [`palette`]: viridis 색상
//! - [`pipeline`]: 수익률 테이블에서 이미지까지 한 번에 실행

pub mod composer;
pub mod exporter;
mod font;
pub mod palette;
pub mod pipeline;

pub use composer::{FigureArtifact, FigureComposer, FigureStyle, RidgeArea, StatisticsTable};
pub use exporter::{CanvasLayout, ExportOptions, ImageExporter, ImageFormat};
pub use palette::Rgb;
pub use pipeline::{render_ridge_plot, RenderOutcome, RenderRequest};
