//! 설정 관리.
//!
//! 설정은 내장 기본값 → 설정 파일 → 환경 변수(`RIDGE__…`) 순서로 덮어씁니다.
//! CLI 플래그는 이 위에 호출자가 직접 적용합니다.
//!
//! 날짜가 들어가는 기본 파일명은 정의 시점이 아니라 호출 시점에
//! [`OutputConfig::resolve_file_name`]으로 계산합니다.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RidgeError, RidgeResult};
use crate::logging::LogFormat;

/// 기본 수익률 테이블 경로
pub const DEFAULT_RETURNS_PATH: &str = "input/returns.csv";
/// 기본 종목 목록 경로
pub const DEFAULT_STOCKS_PATH: &str = "input/stocks.txt";
/// 기본 출력 디렉토리
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
/// 기본 곡선 간 수직 간격
pub const DEFAULT_Y_SPACING: f64 = 0.5;
/// 기본 출력 해상도 (DPI)
pub const DEFAULT_DPI: u32 = 300;
/// 허용하는 최대 해상도 (DPI)
pub const MAX_DPI: u32 = 1200;
/// 기본 플롯 제목
pub const DEFAULT_TITLE: &str = "Ridge Plot of Returns for Stocks";
/// 기본 조회 기간
pub const DEFAULT_PERIOD: &str = "5y";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 입력 설정
    pub input: InputConfig,
    /// 출력 설정
    pub output: OutputConfig,
    /// 플롯 설정
    pub plot: PlotConfig,
    /// 시세 수집 설정
    pub fetch: FetchConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 입력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// 수익률 테이블 스냅샷 경로
    pub returns_path: PathBuf,
    /// 종목 목록 파일 경로 (한 줄에 하나)
    pub stocks_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            returns_path: PathBuf::from(DEFAULT_RETURNS_PATH),
            stocks_path: PathBuf::from(DEFAULT_STOCKS_PATH),
        }
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 이미지를 저장할 디렉토리 (자동 생성하지 않음)
    pub directory: PathBuf,
    /// 출력 파일명. 없으면 `<YYYY-MM-DD>_ridge_plot.png`
    pub file_name: Option<String>,
    /// 해상도 (인치당 도트)
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: None,
            dpi: DEFAULT_DPI,
        }
    }
}

impl OutputConfig {
    /// 출력 파일명을 결정합니다.
    ///
    /// 명시된 파일명이 없으면 `today`로 기본 파일명을 만듭니다.
    pub fn resolve_file_name(&self, today: NaiveDate) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| default_file_name(today))
    }
}

/// 날짜가 포함된 기본 출력 파일명.
pub fn default_file_name(today: NaiveDate) -> String {
    format!("{}_ridge_plot.png", today.format("%Y-%m-%d"))
}

/// 플롯 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotConfig {
    /// 곡선 간 수직 간격 (양수)
    pub y_spacing: f64,
    /// 플롯 제목
    pub title: String,
    /// 라벨 렌더링용 폰트 파일 (TTF/OTF)
    pub font_path: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            y_spacing: DEFAULT_Y_SPACING,
            title: DEFAULT_TITLE.to_string(),
            font_path: None,
        }
    }
}

impl PlotConfig {
    /// 플롯 파라미터를 검증합니다.
    pub fn validate(&self) -> RidgeResult<()> {
        if !self.y_spacing.is_finite() || self.y_spacing <= 0.0 {
            return Err(RidgeError::InvalidSpacing(self.y_spacing));
        }
        Ok(())
    }
}

/// 시세 수집 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 조회 기간 (Yahoo range 표기: 1y, 2y, 5y, 10y, max)
    pub period: String,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD.to_string(),
            timeout_secs: 30,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> RidgeResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("RIDGE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// 전체 설정을 검증합니다.
    pub fn validate(&self) -> RidgeResult<()> {
        self.plot.validate()?;
        if self.output.dpi == 0 || self.output.dpi > MAX_DPI {
            return Err(RidgeError::Config(format!(
                "output.dpi must be between 1 and {} (got {})",
                MAX_DPI, self.output.dpi
            )));
        }
        self.logging.format.parse::<LogFormat>()?;
        Ok(())
    }
}
