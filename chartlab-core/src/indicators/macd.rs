//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD = EMA(fast) - EMA(slow), signal = EMA(signal) of the MACD line.
//! Every EMA is seeded at its first input, so both lines are defined from bar 0.

use super::ema::ema_of_series;
use super::indicator::Indicator;
use crate::domain::bar::{closes, Bar};

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
}

/// The MACD line and its signal line, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn new(line: MacdLine, fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        let name = match line {
            MacdLine::Macd => macd_name(fast, slow),
            MacdLine::Signal => signal_name(signal),
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name,
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(MacdLine::Macd, fast, slow, signal)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(MacdLine::Signal, fast, slow, signal)
    }
}

/// Series name of the MACD line, e.g. `macd_12_26`.
pub fn macd_name(fast: usize, slow: usize) -> String {
    format!("macd_{fast}_{slow}")
}

/// Series name of the signal line, e.g. `macd_signal_9`.
pub fn signal_name(signal: usize) -> String {
    format!("macd_signal_{signal}")
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let lines = macd_lines(&closes(bars), self.fast, self.slow, self.signal);
        let values = match self.line {
            MacdLine::Macd => lines.macd,
            MacdLine::Signal => lines.signal,
        };
        values.into_iter().map(Some).collect()
    }
}

/// Compute the MACD and signal lines of a slice.
pub fn macd_lines(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let fast_ema = ema_of_series(values, fast);
    let slow_ema = ema_of_series(values, slow);
    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_of_series(&macd, signal);
    MacdLines { macd, signal }
}
