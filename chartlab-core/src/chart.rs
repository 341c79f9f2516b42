//! Chart assembly: engine followed by composer, for one or many instruments.

use crate::composer::{compose, Chart, ChartType};
use crate::domain::Bar;
use crate::engine::{compute_indicators, EngineError, IndicatorRequest};
use serde::{Deserialize, Serialize};

/// Everything that shapes a chart apart from the data itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub chart_type: ChartType,
    pub indicators: IndicatorRequest,
}

/// Compute the requested indicators and compose the panels for one instrument.
pub fn build_chart(symbol: &str, bars: &[Bar], options: &ChartOptions) -> Result<Chart, EngineError> {
    let indicators = compute_indicators(bars, &options.indicators)?;
    Ok(compose(symbol, bars, &indicators, options.chart_type))
}

/// Build charts for several instruments independently.
///
/// Instruments that cannot be charted are left out; the rest keep their input
/// order. Callers that need to know what was dropped compare symbols.
pub fn compose_batch<S, B>(inputs: &[(S, B)], options: &ChartOptions) -> Vec<Chart>
where
    S: AsRef<str>,
    B: AsRef<[Bar]>,
{
    inputs
        .iter()
        .filter_map(|(symbol, bars)| build_chart(symbol.as_ref(), bars.as_ref(), options).ok())
        .collect()
}
