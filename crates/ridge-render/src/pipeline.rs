//! 수익률 테이블에서 이미지 파일까지의 전체 렌더링 흐름.
//!
//! 통계 → 밀도 → 배치 → 구성 → 내보내기 순서로 실행하며, 어느 단계든
//! 실패하면 즉시 중단하고 파일을 남기지 않습니다.

use std::path::PathBuf;

use ridge_analytics::{DensityEstimator, RidgeLayoutEngine, StatisticsCalculator};
use ridge_core::{
    AssetStatistics, ReturnsTable, RidgeError, RidgeResult, DEFAULT_DPI, DEFAULT_OUTPUT_DIR,
    DEFAULT_TITLE, DEFAULT_Y_SPACING,
};
use tracing::{info, info_span};

use crate::composer::{FigureComposer, FigureStyle};
use crate::exporter::{ExportOptions, ImageExporter};

/// 렌더링 요청
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub output_directory: PathBuf,
    pub file_name: String,
    pub y_spacing: f64,
    pub dpi: u32,
    pub title: String,
    pub font_path: Option<PathBuf>,
}

impl RenderRequest {
    /// 기본 설정으로 요청을 만듭니다.
    pub fn new(output_directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            output_directory: output_directory.into(),
            file_name: file_name.into(),
            y_spacing: DEFAULT_Y_SPACING,
            dpi: DEFAULT_DPI,
            title: DEFAULT_TITLE.to_string(),
            font_path: None,
        }
    }

    pub fn with_y_spacing(mut self, y_spacing: f64) -> Self {
        self.y_spacing = y_spacing;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 라벨 폰트. 지정한 파일을 읽을 수 없으면 렌더링이 실패합니다.
    pub fn with_font_path(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, "ridge_plot.png")
    }
}

/// 렌더링 결과
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// 기록된 이미지 경로
    pub output_path: PathBuf,
    /// 테이블에 표시된 자산별 통계 (입력 열 순서)
    pub statistics: Vec<AssetStatistics>,
}

/// 수익률 테이블로 릿지 플롯 이미지를 만듭니다.
pub fn render_ridge_plot(
    table: &ReturnsTable,
    request: &RenderRequest,
) -> RidgeResult<RenderOutcome> {
    let span = info_span!("render_ridge_plot", assets = table.num_assets());
    let _guard = span.enter();

    // 데이터 처리 전에 간격부터 검증
    let layout_engine = RidgeLayoutEngine::new(request.y_spacing)?;

    if table.is_empty() {
        return Err(RidgeError::InvalidInput(
            "returns table has no asset columns".to_string(),
        ));
    }

    let statistics = StatisticsCalculator::new().calculate_all(table)?;
    let curves = DensityEstimator::new().estimate_all(table)?;
    let layout = layout_engine.layout(curves);

    let style = FigureStyle::default().with_title(request.title.clone());
    let figure = FigureComposer::new(style).compose(&layout, &statistics)?;

    let exporter = ImageExporter::new(ExportOptions {
        dpi: request.dpi,
        font_path: request.font_path.clone(),
    });
    let output_path = exporter.export(&figure, &request.output_directory, &request.file_name)?;

    info!(
        path = %output_path.display(),
        assets = statistics.len(),
        "Ridge plot rendered"
    );

    Ok(RenderOutcome {
        output_path,
        statistics,
    })
}
