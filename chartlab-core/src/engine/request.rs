//! Indicator selection flags.

use serde::{Deserialize, Serialize};

/// Which derived series to compute. Flags are independent and composable.
///
/// Deserializes from a TOML/JSON table where missing flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorRequest {
    pub sma: bool,
    pub ema: bool,
    pub bollinger: bool,
    pub macd: bool,
    pub rsi: bool,
    pub elliott: bool,
}

impl IndicatorRequest {
    /// Request every indicator.
    pub fn all() -> Self {
        Self {
            sma: true,
            ema: true,
            bollinger: true,
            macd: true,
            rsi: true,
            elliott: true,
        }
    }

    /// True when no flag is set (price-only chart).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Union of two requests; used to layer CLI flags over a config file.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sma: self.sma || other.sma,
            ema: self.ema || other.ema,
            bollinger: self.bollinger || other.bollinger,
            macd: self.macd || other.macd,
            rsi: self.rsi || other.rsi,
            elliott: self.elliott || other.elliott,
        }
    }
}
