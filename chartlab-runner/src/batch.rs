//! Chart batch runner: fetch, compute and compose each instrument.
//!
//! Instruments are independent. One failing (no data, bad response) is logged
//! and recorded in the report; the others still produce charts. Results keep
//! the input ticker order whether run in parallel or sequentially.

use chartlab_core::composer::Chart;
use chartlab_core::data::{DataError, DataProvider};
use chartlab_core::engine::EngineError;
use chartlab_core::{build_chart, ChartOptions};
use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why one instrument produced no chart.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// One batch of instruments sharing a date range and chart options.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub tickers: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub options: ChartOptions,
    pub parallel: bool,
}

/// Charts that were built plus the instruments that were skipped.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub charts: Vec<Chart>,
    pub failures: Vec<(String, BatchError)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.charts.iter().map(|c| c.symbol.as_str()).collect()
    }
}

/// Fetch and chart a single instrument.
pub fn chart_symbol(
    provider: &dyn DataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    options: &ChartOptions,
) -> Result<Chart, BatchError> {
    let fetched = provider.fetch(symbol, start, end)?;
    debug!(%symbol, bars = fetched.bars.len(), source = ?fetched.source, "fetched bars");
    Ok(build_chart(symbol, &fetched.bars, options)?)
}

/// Run a whole batch against one provider.
pub fn run_batch(provider: &dyn DataProvider, request: &BatchRequest) -> BatchReport {
    info!(
        tickers = request.tickers.len(),
        provider = provider.name(),
        start = %request.start,
        end = %request.end,
        parallel = request.parallel,
        "starting chart batch"
    );

    let run = |symbol: &String| {
        let result = chart_symbol(provider, symbol, request.start, request.end, &request.options);
        (symbol.clone(), result)
    };

    let results: Vec<(String, Result<Chart, BatchError>)> = if request.parallel {
        request.tickers.par_iter().map(run).collect()
    } else {
        request.tickers.iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (symbol, result) in results {
        match result {
            Ok(chart) => report.charts.push(chart),
            Err(e) => {
                warn!(%symbol, error = %e, "skipping instrument");
                report.failures.push((symbol, e));
            }
        }
    }

    info!(
        charts = report.charts.len(),
        failures = report.failures.len(),
        "chart batch finished"
    );
    report
}
