//! ChartLab Runner: batch orchestration on top of `chartlab-core`.
//!
//! This crate provides:
//! - TOML chart configuration (tickers, range, indicators, source, output)
//! - Batch runner fetching and charting instruments in parallel with rayon
//! - JSON export of the composed charts

pub mod batch;
pub mod config;
pub mod export;

pub use batch::{chart_symbol, run_batch, BatchError, BatchReport, BatchRequest};
pub use config::{ChartConfig, ConfigError, OutputConfig, SourceConfig, DEFAULT_LOOKBACK_DAYS};
pub use export::{chart_path, export_chart_json, write_charts, ExportError};
