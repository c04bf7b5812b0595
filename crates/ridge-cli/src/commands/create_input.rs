//! `create-input` 명령어: 종목 목록 → 가격 다운로드 → 수익률 테이블 CSV.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ridge_core::AppConfig;
use ridge_data::{fetch_price_table, load_symbols, save_returns, YahooPriceProvider};
use tracing::info;

use super::ensure_directories_exist;

/// 입력 테이블을 생성하고 저장 경로를 반환합니다.
///
/// 입력/출력 디렉토리가 없으면 먼저 만듭니다.
pub async fn run(config: &AppConfig) -> Result<PathBuf> {
    let returns_path = config.input.returns_path.clone();
    let input_dir = returns_path.parent().map(PathBuf::from).unwrap_or_default();
    ensure_directories_exist(&[input_dir.as_path(), config.output.directory.as_path()])
        .context("Failed to create working directories")?;

    let symbols = load_symbols(&config.input.stocks_path).with_context(|| {
        format!(
            "Failed to read symbol list {}",
            config.input.stocks_path.display()
        )
    })?;
    info!(
        "Fetching {} symbols ({}) from Yahoo Finance",
        symbols.len(),
        config.fetch.period
    );

    let provider = YahooPriceProvider::new(Duration::from_secs(config.fetch.timeout_secs))
        .context("Failed to create HTTP client")?;

    // 진행률 표시줄
    let pb = ProgressBar::new(symbols.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let prices = fetch_price_table(&provider, &symbols, &config.fetch.period, |i, symbol| {
        pb.set_position(i as u64);
        pb.set_message(format!("Fetching {}...", symbol));
    })
    .await;
    pb.finish_and_clear();
    let prices = prices.context("Failed to download prices")?;

    let table = prices
        .to_returns()
        .context("Failed to convert prices to returns")?;
    save_returns(&returns_path, &table)
        .with_context(|| format!("Failed to save {}", returns_path.display()))?;

    info!(
        "Saved {} trading days for {} symbols to {}",
        table.num_rows(),
        table.num_assets(),
        returns_path.display()
    );
    Ok(returns_path)
}
