//! 로그 출력 초기화.
//!
//! 레벨 필터는 `RUST_LOG`가 있으면 그 값을, 없으면 설정 파일의
//! `logging.level`을 씁니다. 형식은 `pretty`, `json`, `compact` 중 하나입니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{RidgeError, RidgeResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함
    Pretty,
    /// 한 줄에 JSON 객체 하나
    Json,
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = RidgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(RidgeError::Config(format!(
                "logging.format must be pretty, json or compact (got {:?})",
                other
            ))),
        }
    }
}

/// 초기화에 쓰이는 최종 로그 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// `EnvFilter` 지시어 (예: "info", "ridge_render=debug")
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// 설정 파일 값과 `RUST_LOG` 값을 합칩니다. `env_level`이 우선합니다.
    pub fn resolve(settings: &LoggingConfig, env_level: Option<String>) -> RidgeResult<Self> {
        let level = env_level
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| settings.level.clone());

        Ok(Self {
            level,
            format: settings.format.parse()?,
        })
    }
}

/// 전역 tracing subscriber를 설치합니다.
///
/// 프로세스당 한 번만 성공합니다.
pub fn init_logging(config: &LogConfig) -> RidgeResult<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| RidgeError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| RidgeError::Config(format!("logging already initialized: {}", e)))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// 자산 단위 처리 span (`asset`, `index` 필드).
#[macro_export]
macro_rules! asset_span {
    ($name:expr, $asset:expr, $index:expr) => {
        tracing::debug_span!($name, asset = %$asset, index = $index)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!(matches!("xml".parse::<LogFormat>(), Err(RidgeError::Config(_))));
    }

    #[test]
    fn test_rust_log_overrides_file_level() {
        let file = settings("info", "compact");

        let config = LogConfig::resolve(&file, Some("ridge_render=debug".to_string())).unwrap();
        assert_eq!(config.level, "ridge_render=debug");

        let config = LogConfig::resolve(&file, None).unwrap();
        assert_eq!(config.level, "info");

        let config = LogConfig::resolve(&file, Some("  ".to_string())).unwrap();
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_unknown_format_is_config_error() {
        let result = LogConfig::resolve(&settings("info", "yaml"), None);
        assert!(matches!(result, Err(RidgeError::Config(_))));
    }

    #[test]
    fn test_invalid_level_rejected_before_install() {
        let config = LogConfig {
            level: "ridge_core=loud".to_string(),
            format: LogFormat::Compact,
        };
        assert!(matches!(init_logging(&config), Err(RidgeError::Config(_))));
    }
}
