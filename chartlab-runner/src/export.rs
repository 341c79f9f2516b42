//! Chart export: one pretty-printed JSON file per instrument.
//!
//! Files are named `<SYMBOL>.json` inside the output directory, which is
//! created when missing. Existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use chartlab_core::composer::Chart;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize chart for {symbol}: {source}")]
    Serialize {
        symbol: String,
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn chart_path(dir: &Path, symbol: &str) -> PathBuf {
    dir.join(format!("{symbol}.json"))
}

/// Serialize a chart to pretty JSON.
pub fn export_chart_json(chart: &Chart) -> Result<String, ExportError> {
    serde_json::to_string_pretty(chart).map_err(|source| ExportError::Serialize {
        symbol: chart.symbol.clone(),
        source,
    })
}

/// Write every chart into `dir`, returning the written paths in chart order.
pub fn write_charts(dir: &Path, charts: &[Chart]) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    charts
        .iter()
        .map(|chart| {
            let path = chart_path(dir, &chart.symbol);
            let json = export_chart_json(chart)?;
            fs::write(&path, json).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(symbol = %chart.symbol, path = %path.display(), "wrote chart");
            Ok(path)
        })
        .collect()
}
