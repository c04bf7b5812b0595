//! 명령줄 인자 정의.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ridge_core::{AppConfig, MAX_DPI};

#[derive(Debug, Parser)]
#[command(name = "ridgeplot")]
#[command(about = "Ridge plot of stock return distributions with a statistics table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 설정 파일 (없으면 기본값과 RIDGE__* 환경 변수 사용)
    #[arg(short, long, global = true, default_value = "config/ridgeplot.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 수익률 테이블로 릿지 플롯 이미지 생성
    Plot(PlotArgs),

    /// 종목 목록의 가격을 내려받아 수익률 테이블 생성 (Yahoo Finance)
    CreateInput(CreateInputArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct PlotArgs {
    /// 수익률 테이블 CSV 경로
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 출력 디렉토리 (미리 존재해야 함)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 출력 파일명 (기본: <YYYY-MM-DD>_ridge_plot.png)
    #[arg(short, long)]
    pub name: Option<String>,

    /// 곡선 간 수직 간격
    #[arg(short, long, allow_hyphen_values = true)]
    pub y_spacing: Option<f64>,

    /// 해상도 (DPI, 1 ~ 1200)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI)))]
    pub dpi: Option<u32>,

    /// 플롯 제목
    #[arg(long)]
    pub title: Option<String>,
}

impl PlotArgs {
    /// 지정된 인자로 설정을 덮어씁니다.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.input.returns_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
        if let Some(name) = &self.name {
            config.output.file_name = Some(name.clone());
        }
        if let Some(y_spacing) = self.y_spacing {
            config.plot.y_spacing = y_spacing;
        }
        if let Some(dpi) = self.dpi {
            config.output.dpi = dpi;
        }
        if let Some(title) = &self.title {
            config.plot.title = title.clone();
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CreateInputArgs {
    /// 종목 목록 파일 (한 줄에 하나)
    #[arg(short, long)]
    pub stocks: Option<PathBuf>,

    /// 저장할 수익률 테이블 CSV 경로
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 조회 기간 (1y, 2y, 5y, 10y, max)
    #[arg(short, long)]
    pub period: Option<String>,
}

impl CreateInputArgs {
    /// 지정된 인자로 설정을 덮어씁니다.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(stocks) = &self.stocks {
            config.input.stocks_path = stocks.clone();
        }
        if let Some(output) = &self.output {
            config.input.returns_path = output.clone();
        }
        if let Some(period) = &self.period {
            config.fetch.period = period.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plot_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["ridgeplot", "plot"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config/ridgeplot.toml"));

        let Commands::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.input.returns_path, PathBuf::from("input/returns.csv"));
        assert_eq!(config.output.directory, PathBuf::from("./output"));
        assert_eq!(config.output.file_name, None);
        assert_eq!(config.plot.y_spacing, 0.5);
        assert_eq!(config.output.dpi, 300);
    }

    #[test]
    fn test_plot_flags_override() {
        let cli = Cli::try_parse_from([
            "ridgeplot", "plot", "-i", "data/r.csv", "-o", "out", "-n", "x.png", "-y", "1.25",
            "--dpi", "150", "--title", "Sector ETFs",
        ])
        .unwrap();

        let Commands::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.input.returns_path, PathBuf::from("data/r.csv"));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.output.file_name.as_deref(), Some("x.png"));
        assert_eq!(config.plot.y_spacing, 1.25);
        assert_eq!(config.output.dpi, 150);
        assert_eq!(config.plot.title, "Sector ETFs");
    }

    #[test]
    fn test_negative_spacing_parses() {
        // 값 검증은 렌더링 단계에서 수행
        let cli = Cli::try_parse_from(["ridgeplot", "plot", "-y", "-1"]).unwrap();
        let Commands::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.y_spacing, Some(-1.0));
    }

    #[test]
    fn test_create_input_flags() {
        let cli = Cli::try_parse_from([
            "ridgeplot", "-c", "custom.toml", "create-input", "-s", "s.txt", "-o", "r.csv",
            "--period", "10y",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));

        let Commands::CreateInput(args) = cli.command else {
            panic!("expected create-input");
        };
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.input.stocks_path, PathBuf::from("s.txt"));
        assert_eq!(config.input.returns_path, PathBuf::from("r.csv"));
        assert_eq!(config.fetch.period, "10y");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["ridgeplot", "draw"]).is_err());
        assert!(Cli::try_parse_from(["ridgeplot", "plot", "--dpi", "abc"]).is_err());
    }

    #[test]
    fn test_dpi_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["ridgeplot", "plot", "--dpi", "0"]).is_err());
        assert!(Cli::try_parse_from(["ridgeplot", "plot", "--dpi", "1000000000"]).is_err());
        assert!(Cli::try_parse_from(["ridgeplot", "plot", "--dpi", "1200"]).is_ok());
    }
}
