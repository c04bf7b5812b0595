//! 릿지 플롯 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # input/stocks.txt의 종목으로 5년치 수익률 테이블 생성
//! ridgeplot create-input
//!
//! # 기본 입력/출력으로 릿지 플롯 생성 (output/<오늘>_ridge_plot.png)
//! ridgeplot plot
//!
//! # 간격과 파일명 지정
//! ridgeplot plot -i input/returns.csv -o output -n sectors.png -y 0.8
//! ```

use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use ridge_cli::commands::{create_input, plot};
use ridge_cli::{Cli, Commands};
use ridge_core::{init_logging, AppConfig, LogConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // .env 파일은 선택 사항
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(&cli.config)?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Plot(args) => {
            args.apply(&mut config);
            let today = Local::now().date_naive();

            let outcome = plot::run(&config, today)?;
            info!("✅ Ridge plot saved");
            println!("Ridge plot saved to {}", outcome.output_path.display());
        }

        Commands::CreateInput(args) => {
            args.apply(&mut config);

            let path = create_input::run(&config).await?;
            info!("✅ Input table created");
            println!("Returns table saved to {}", path.display());
        }
    }

    Ok(())
}

/// 로깅 초기화. `RUST_LOG`가 있으면 설정 파일의 레벨보다 우선합니다.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let log = LogConfig::resolve(&config.logging, std::env::var("RUST_LOG").ok())?;
    init_logging(&log)?;
    Ok(())
}
