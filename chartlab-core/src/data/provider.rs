//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over bar sources (MOEX ISS, CSV import,
//! synthetic) so the chart pipeline can be fed and tested without a network.

use crate::domain::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} while fetching {symbol}")]
    HttpStatus { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("no data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("CSV error for {symbol}: {reason}")]
    Csv { symbol: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Moex,
    CsvImport,
    Synthetic,
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<Bar>,
    pub source: DataSource,
}

/// Trait for daily bar providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over the inclusive range `[start, end]`.
    ///
    /// Returns bars ascending by date with unique dates, or
    /// `DataError::NoData` when the range yields nothing.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}

pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DataError> {
    if start > end {
        return Err(DataError::InvalidRange { start, end });
    }
    Ok(())
}

/// Bring provider output into the shape the engine expects.
///
/// Drops void or inconsistent bars (see `Bar::is_sane`) and bars outside
/// `[start, end]`, sorts ascending and keeps the last bar for any repeated
/// date. An empty result is `NoData`.
pub fn finalize_bars(
    symbol: &str,
    mut bars: Vec<Bar>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bar>, DataError> {
    let before = bars.len();
    bars.retain(|b| b.is_sane() && b.date >= start && b.date <= end);
    if bars.len() < before {
        debug!(
            %symbol,
            dropped = before - bars.len(),
            "dropped bars outside range or failing sanity checks"
        );
    }
    // Stable sort keeps provider order among equal dates; the later one wins.
    bars.sort_by_key(|b| b.date);
    let mut unique: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match unique.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => unique.push(bar),
        }
    }

    if unique.is_empty() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
            start,
            end,
        });
    }
    Ok(unique)
}
