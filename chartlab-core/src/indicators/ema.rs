//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[0] = close[0], so the series is defined from the first bar.
//! Lookback: 0.

use super::indicator::Indicator;
use crate::domain::bar::{closes, Bar};

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        ema_of_series(&closes(bars), self.period)
            .into_iter()
            .map(Some)
            .collect()
    }
}

/// Smoothing factor for a span of `period` observations.
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// EMA of an arbitrary slice, seeded at its first element.
///
/// Used directly by MACD, which smooths both closes and its own line.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = smoothing_factor(period);
    let mut prev: Option<f64> = None;
    values
        .iter()
        .map(|&v| {
            let ema = match prev {
                Some(p) => alpha * v + (1.0 - alpha) * p,
                None => v,
            };
            prev = Some(ema);
            ema
        })
        .collect()
}
