//! Indicator engine turns a bar series plus an `IndicatorRequest` into
//! named, date-aligned derived series.
//!
//! Pure and deterministic: no I/O, no shared state.

pub mod precompute;
pub mod request;

pub use precompute::{compute_indicators, IndicatorSet, MacdSeries};
pub use request::IndicatorRequest;

use thiserror::Error;

/// Errors from the indicator engine.
///
/// Undefined warm-up values and the RSI zero-loss boundary are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no bar data to compute indicators from")]
    NoData,
}
