//! Relative Strength Index (RSI).
//!
//! Simple rolling means of gains and losses over `period` price changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (the first change exists at index 1).
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 with losses → RSI = 0.

use super::indicator::Indicator;
use super::window::RollingWindow;
use crate::domain::bar::{closes, Bar};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        rsi_of_series(&closes(bars), self.period)
    }
}

/// RSI of an arbitrary slice.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = RollingWindow::new(period);
    let mut losses = RollingWindow::new(period);
    let mut result = Vec::with_capacity(values.len());

    if values.is_empty() {
        return result;
    }
    // No change exists for the first bar.
    result.push(None);

    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
        result.push(match (gains.mean(), losses.mean()) {
            (Some(avg_gain), Some(avg_loss)) => Some(compute_rsi(avg_gain, avg_loss)),
            _ => None,
        });
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // RS is infinite; this includes the flat window where both averages are 0.
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
