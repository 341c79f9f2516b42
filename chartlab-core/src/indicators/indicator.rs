//! Indicator trait.
//!
//! Indicators are pure functions: bar history in, numeric series out.

use crate::domain::{Bar, Series};

/// Trait for single-series indicators.
///
/// `compute` returns exactly one slot per bar. The first `lookback()` slots
/// are `None` (warm-up); no slot may depend on bars after it.
pub trait Indicator: Send + Sync {
    /// Series name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading bars without a value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;

    /// Compute and pair the values with the bar dates.
    fn series(&self, bars: &[Bar]) -> Series {
        Series::from_values(self.name(), bars, self.compute(bars))
    }
}
