//! Chart description types handed to an external renderer.

use crate::domain::{Bar, Series};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the price is drawn in the first panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Candlestick,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart type '{0}' (expected 'line' or 'candlestick')")]
pub struct ParseChartTypeError(pub String);

impl FromStr for ChartType {
    type Err = ParseChartTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            "candlestick" | "candle" => Ok(ChartType::Candlestick),
            other => Err(ParseChartTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Line => f.write_str("line"),
            ChartType::Candlestick => f.write_str("candlestick"),
        }
    }
}

/// What a panel shows. Determines its place and its share of the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Price,
    Macd,
    Rsi,
}

impl PanelKind {
    pub fn y_axis_label(self) -> &'static str {
        match self {
            PanelKind::Price => "Price",
            PanelKind::Macd => "MACD",
            PanelKind::Rsi => "RSI",
        }
    }

    /// Relative height weight; the price panel always gets the largest share.
    pub fn height_weight(self) -> f64 {
        match self {
            PanelKind::Price => 3.0,
            PanelKind::Macd | PanelKind::Rsi => 1.0,
        }
    }
}

/// A labelled point drawn as a marker (wave points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
}

/// One drawable element of a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trace {
    Line(Series),
    Candlestick { name: String, bars: Vec<Bar> },
    Markers { name: String, markers: Vec<Marker> },
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Line(series) => &series.name,
            Trace::Candlestick { name, .. } | Trace::Markers { name, .. } => name,
        }
    }
}

/// A fixed horizontal level drawn across a panel. A rendering hint, not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

/// One vertically stacked chart region sharing the date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// 1-based, top to bottom.
    pub row_index: usize,
    pub kind: PanelKind,
    pub y_axis_label: String,
    pub traces: Vec<Trace>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl Panel {
    pub fn trace_names(&self) -> Vec<&str> {
        self.traces.iter().map(Trace::name).collect()
    }
}

/// The complete chart description for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub symbol: String,
    pub title: String,
    pub x_axis_title: String,
    pub panels: Vec<Panel>,
    /// Fraction of the total height per panel, same order as `panels`.
    pub row_heights: Vec<f64>,
}

impl Chart {
    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_parses_case_insensitively() {
        assert_eq!("Line".parse::<ChartType>().unwrap(), ChartType::Line);
        assert_eq!(
            " candlestick ".parse::<ChartType>().unwrap(),
            ChartType::Candlestick
        );
        assert!("bars".parse::<ChartType>().is_err());
        assert_eq!(ChartType::default(), ChartType::Line);
        assert_eq!(ChartType::Candlestick.to_string(), "candlestick");
    }

    #[test]
    fn trace_serializes_with_kind_tag() {
        let trace = Trace::Markers {
            name: "Elliott Waves".into(),
            markers: vec![],
        };
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["kind"], "markers");
        assert_eq!(json["name"], "Elliott Waves");
    }

    #[test]
    fn price_panel_outweighs_oscillators() {
        assert!(PanelKind::Price.height_weight() > PanelKind::Macd.height_weight());
        assert!(PanelKind::Price.height_weight() > PanelKind::Rsi.height_weight());
    }
}
