//! Panel composer: arranges price, overlays and oscillators into panels.
//!
//! Layout is fixed regardless of how the request flags were set:
//! 1. Price (line or candlestick) with overlays: SMA, EMA, Bollinger, wave markers
//! 2. MACD and signal, if computed
//! 3. RSI with 70/30 reference lines, if computed
//!
//! The composer is a pure transform; it never fails.

pub mod panel;

pub use panel::{
    Chart, ChartType, Marker, Panel, PanelKind, ParseChartTypeError, ReferenceLine, Trace,
};

use crate::domain::{Bar, Series};
use crate::engine::IndicatorSet;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const WAVE_TRACE_NAME: &str = "Elliott Waves";

/// Compose the chart description for one instrument.
pub fn compose(
    symbol: &str,
    bars: &[Bar],
    indicators: &IndicatorSet,
    chart_type: ChartType,
) -> Chart {
    let mut panels = vec![price_panel(symbol, bars, indicators, chart_type)];

    if let Some(macd) = &indicators.macd {
        panels.push(Panel {
            row_index: panels.len() + 1,
            kind: PanelKind::Macd,
            y_axis_label: PanelKind::Macd.y_axis_label().to_string(),
            traces: vec![
                Trace::Line(macd.macd.clone()),
                Trace::Line(macd.signal.clone()),
            ],
            reference_lines: Vec::new(),
        });
    }

    if let Some(rsi) = &indicators.rsi {
        panels.push(Panel {
            row_index: panels.len() + 1,
            kind: PanelKind::Rsi,
            y_axis_label: PanelKind::Rsi.y_axis_label().to_string(),
            traces: vec![Trace::Line(rsi.clone())],
            reference_lines: vec![
                ReferenceLine {
                    value: RSI_OVERBOUGHT,
                    label: "Overbought".into(),
                },
                ReferenceLine {
                    value: RSI_OVERSOLD,
                    label: "Oversold".into(),
                },
            ],
        });
    }

    let row_heights = row_heights(&panels);

    Chart {
        symbol: symbol.to_string(),
        title: symbol.to_string(),
        x_axis_title: "Date".to_string(),
        panels,
        row_heights,
    }
}

fn price_panel(
    symbol: &str,
    bars: &[Bar],
    indicators: &IndicatorSet,
    chart_type: ChartType,
) -> Panel {
    let price = match chart_type {
        ChartType::Line => Trace::Line(Series::of_closes(symbol, bars)),
        ChartType::Candlestick => Trace::Candlestick {
            name: symbol.to_string(),
            bars: bars.to_vec(),
        },
    };

    let mut traces = vec![price];
    traces.extend(indicators.overlays.iter().cloned().map(Trace::Line));

    // An empty detection result draws nothing rather than an empty trace.
    if let Some(waves) = indicators.waves.as_ref().filter(|w| !w.is_empty()) {
        traces.push(Trace::Markers {
            name: WAVE_TRACE_NAME.to_string(),
            markers: waves
                .iter()
                .map(|w| Marker {
                    date: w.date,
                    value: w.price,
                    label: w.label(),
                })
                .collect(),
        });
    }

    Panel {
        row_index: 1,
        kind: PanelKind::Price,
        y_axis_label: PanelKind::Price.y_axis_label().to_string(),
        traces,
        reference_lines: Vec::new(),
    }
}

/// Normalised panel heights, summing to 1.
pub fn row_heights(panels: &[Panel]) -> Vec<f64> {
    let total: f64 = panels.iter().map(|p| p.kind.height_weight()).sum();
    panels
        .iter()
        .map(|p| p.kind.height_weight() / total)
        .collect()
}
