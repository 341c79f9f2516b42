//! Wave points: alternating local extrema used as trend-turning markers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the price path a wave point sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    Peak,
    Trough,
}

/// A recorded extremum. `ordinal` runs 1..=5 in date order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub ordinal: u8,
    pub kind: ExtremumKind,
}

impl WavePoint {
    /// Marker text shown next to the point ("W1".."W5").
    pub fn label(&self) -> String {
        format!("W{}", self.ordinal)
    }
}
