//! Serializable chart batch configuration.
//!
//! A config file describes one batch: which tickers, which date range, which
//! indicators, where the bars come from and where the charts go. Every
//! section is optional; CLI flags layer on top.

use std::path::{Path, PathBuf};

use chartlab_core::composer::ChartType;
use chartlab_core::data::{
    parse_tickers, CsvProvider, DataError, DataProvider, MoexProvider, SyntheticProvider,
};
use chartlab_core::engine::IndicatorRequest;
use chartlab_core::ChartOptions;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days of history charted when no start date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 60;

/// Seed used by the synthetic source when none is configured.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level config file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart: ChartSection,
    pub indicators: IndicatorRequest,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub tickers: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub chart_type: ChartType,
}

/// Where bars come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    #[default]
    Moex,
    Csv {
        dir: PathBuf,
    },
    Synthetic {
        #[serde(default = "default_seed")]
        seed: u64,
    },
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl SourceConfig {
    /// Instantiate the configured provider.
    pub fn build(&self) -> Result<Box<dyn DataProvider>, DataError> {
        Ok(match self {
            SourceConfig::Moex => Box::new(MoexProvider::new()?),
            SourceConfig::Csv { dir } => Box::new(CsvProvider::new(dir)),
            SourceConfig::Synthetic { seed } => Box::new(SyntheticProvider::new(*seed)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub parallel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("charts"),
            parallel: true,
        }
    }
}

impl ChartConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot: date order and a usable CSV directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(start), Some(end)) = (self.chart.start_date, self.chart.end_date) {
            if start > end {
                return Err(ConfigError::Invalid(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
        }
        if let SourceConfig::Csv { dir } = &self.source {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("csv source needs a 'dir'".into()));
            }
        }
        Ok(())
    }

    /// Normalised tickers: uppercased, without blanks or repeats.
    pub fn tickers(&self) -> Vec<String> {
        parse_tickers(&self.chart.tickers.join(","))
    }

    /// Inclusive date range. Missing end is `today`; missing start is
    /// `DEFAULT_LOOKBACK_DAYS` before the end.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.chart.end_date.unwrap_or(today);
        let start = self
            .chart
            .start_date
            .unwrap_or(end - Duration::days(DEFAULT_LOOKBACK_DAYS));
        (start, end)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            chart_type: self.chart.chart_type,
            indicators: self.indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_full_config() {
        let config = ChartConfig::from_toml(
            r#"
            [chart]
            tickers = ["sber", "GAZP", "sber"]
            start_date = "2024-01-01"
            end_date = "2024-03-01"
            chart_type = "candlestick"

            [indicators]
            sma = true
            rsi = true

            [source]
            type = "synthetic"
            seed = 7

            [output]
            dir = "out"
            parallel = false
            "#,
        )
        .unwrap();

        assert_eq!(config.tickers(), vec!["SBER", "GAZP"]);
        assert_eq!(config.date_range(d(2030, 1, 1)), (d(2024, 1, 1), d(2024, 3, 1)));
        assert_eq!(config.chart.chart_type, ChartType::Candlestick);
        assert!(config.indicators.sma && config.indicators.rsi);
        assert!(!config.indicators.macd);
        assert_eq!(config.source, SourceConfig::Synthetic { seed: 7 });
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(!config.output.parallel);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = ChartConfig::from_toml("").unwrap();
        assert!(config.tickers().is_empty());
        assert_eq!(config.source, SourceConfig::Moex);
        assert_eq!(config.chart_options(), ChartOptions::default());
        assert!(config.output.parallel);
        assert_eq!(config.output.dir, PathBuf::from("charts"));
    }

    #[test]
    fn default_range_is_sixty_days_back() {
        let config = ChartConfig::default();
        assert_eq!(config.date_range(d(2024, 3, 1)), (d(2024, 1, 1), d(2024, 3, 1)));
    }

    #[test]
    fn synthetic_seed_defaults() {
        let config = ChartConfig::from_toml("[source]\ntype = \"synthetic\"\n").unwrap();
        assert_eq!(config.source, SourceConfig::Synthetic { seed: DEFAULT_SEED });
    }

    #[test]
    fn rejects_inverted_dates() {
        let err = ChartConfig::from_toml(
            "[chart]\nstart_date = \"2024-03-01\"\nend_date = \"2024-01-01\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_source() {
        let err = ChartConfig::from_toml("[source]\ntype = \"yahoo\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ChartConfig::from_file(Path::new("/nonexistent/chartlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn csv_source_builds_provider() {
        let source = SourceConfig::Csv {
            dir: PathBuf::from("data"),
        };
        assert_eq!(source.build().unwrap().name(), "csv_import");
    }
}
