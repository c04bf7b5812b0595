//! `plot` 명령어: 수익률 테이블 → 릿지 플롯 이미지.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ridge_core::AppConfig;
use ridge_data::load_returns;
use ridge_render::{render_ridge_plot, RenderOutcome, RenderRequest};
use tracing::info;

/// 설정으로 렌더링 요청을 만듭니다. 파일명이 없으면 `today` 기준 기본값.
pub fn build_request(config: &AppConfig, today: NaiveDate) -> RenderRequest {
    RenderRequest::new(
        config.output.directory.clone(),
        config.output.resolve_file_name(today),
    )
    .with_y_spacing(config.plot.y_spacing)
    .with_dpi(config.output.dpi)
    .with_title(config.plot.title.clone())
    .with_font_path(config.plot.font_path.clone())
}

/// 입력 테이블을 읽어 이미지를 생성합니다.
pub fn run(config: &AppConfig, today: NaiveDate) -> Result<RenderOutcome> {
    let input = &config.input.returns_path;
    info!("Loading returns table from {}", input.display());

    let table = load_returns(input)
        .with_context(|| format!("Failed to load returns table from {}", input.display()))?;

    let request = build_request(config, today);
    let outcome = render_ridge_plot(&table, &request).context("Failed to render ridge plot")?;

    for stats in &outcome.statistics {
        let [stock, mean, std_dev, width] = stats.table_row();
        info!("{:<10} mean={} std={} width={}", stock, mean, std_dev, width);
    }

    Ok(outcome)
}
