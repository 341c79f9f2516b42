//! Indicator computation for one instrument.
//!
//! Every requested indicator is computed once over the full bar series and
//! returned as date-aligned `Series` in an `IndicatorSet`.

use super::request::IndicatorRequest;
use super::EngineError;
use crate::domain::bar::{closes, is_strictly_ascending};
use crate::domain::{Bar, Series, WavePoint};
use crate::indicators::{
    bollinger_bands, macd_lines, wave_points, Bollinger, BollingerBand, Ema, Indicator, Macd,
    Rsi, Sma, BOLLINGER_MULTIPLIER, BOLLINGER_PERIOD, EMA_PERIOD, MACD_FAST, MACD_SIGNAL,
    MACD_SLOW, RSI_PERIOD, SMA_PERIOD,
};
use serde::Serialize;

/// MACD line plus its signal line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
}

/// The derived series for one instrument, each present only when requested.
///
/// `overlays` share the price panel and are kept in a fixed order:
/// SMA, EMA, Bollinger upper/middle/lower.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub overlays: Vec<Series>,
    pub macd: Option<MacdSeries>,
    pub rsi: Option<Series>,
    pub waves: Option<Vec<WavePoint>>,
}

impl IndicatorSet {
    /// All numeric series in panel order: overlays, MACD, signal, RSI.
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.overlays
            .iter()
            .chain(self.macd.iter().flat_map(|m| [&m.macd, &m.signal]))
            .chain(self.rsi.iter())
    }

    /// Look up a series by name (e.g. "sma_20").
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.series().map(|s| s.name.as_str()).collect()
    }

    /// Number of numeric series stored (wave points excluded).
    pub fn len(&self) -> usize {
        self.series().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.waves.is_none()
    }
}

/// Compute the requested indicators over `bars`.
///
/// Returns `EngineError::NoData` for an empty series; never fails otherwise.
pub fn compute_indicators(
    bars: &[Bar],
    request: &IndicatorRequest,
) -> Result<IndicatorSet, EngineError> {
    if bars.is_empty() {
        return Err(EngineError::NoData);
    }
    debug_assert!(is_strictly_ascending(bars), "bars must be ordered by date");

    let mut set = IndicatorSet::default();

    if request.sma {
        set.overlays.push(Sma::new(SMA_PERIOD).series(bars));
    }

    if request.ema {
        set.overlays.push(Ema::new(EMA_PERIOD).series(bars));
    }

    // Multi-line indicators run once; the per-line types supply the names.
    if request.bollinger {
        let bands = bollinger_bands(&closes(bars), BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER);
        for (band, values) in [
            (BollingerBand::Upper, bands.upper),
            (BollingerBand::Middle, bands.middle),
            (BollingerBand::Lower, bands.lower),
        ] {
            let indicator = Bollinger::new(band, BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER);
            set.overlays.push(Series::from_values(indicator.name(), bars, values));
        }
    }

    if request.macd {
        let lines = macd_lines(&closes(bars), MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        let line = Macd::line(MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        let signal = Macd::signal(MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        set.macd = Some(MacdSeries {
            macd: Series::from_values(line.name(), bars, lines.macd.into_iter().map(Some).collect()),
            signal: Series::from_values(
                signal.name(),
                bars,
                lines.signal.into_iter().map(Some).collect(),
            ),
        });
    }

    if request.rsi {
        set.rsi = Some(Rsi::new(RSI_PERIOD).series(bars));
    }

    if request.elliott {
        set.waves = Some(wave_points(bars));
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn trending(n: usize) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin() * 3.0)
            .collect();
        make_bars(&closes)
    }

    #[test]
    fn empty_bars_is_no_data() {
        let err = compute_indicators(&[], &IndicatorRequest::all()).unwrap_err();
        assert_eq!(err, EngineError::NoData);
    }

    #[test]
    fn empty_request_computes_nothing() {
        let set = compute_indicators(&trending(30), &IndicatorRequest::default()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn full_request_names_every_series() {
        let set = compute_indicators(&trending(40), &IndicatorRequest::all()).unwrap();
        assert_eq!(
            set.names(),
            vec![
                "sma_20",
                "ema_20",
                "bb_upper_20",
                "bb_middle_20",
                "bb_lower_20",
                "macd_12_26",
                "macd_signal_9",
                "rsi_14",
            ]
        );
        assert!(set.waves.is_some());
    }

    #[test]
    fn every_series_is_aligned_with_bars() {
        let bars = trending(45);
        let set = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();
        for series in set.series() {
            assert_eq!(series.len(), bars.len(), "{} misaligned", series.name);
            for (point, bar) in series.points.iter().zip(&bars) {
                assert_eq!(point.date, bar.date);
            }
        }
    }

    #[test]
    fn bollinger_middle_matches_sma() {
        let bars = trending(30);
        let set = compute_indicators(
            &bars,
            &IndicatorRequest {
                sma: true,
                bollinger: true,
                ..Default::default()
            },
        )
        .unwrap();
        let sma = set.get("sma_20").unwrap();
        let middle = set.get("bb_middle_20").unwrap();
        for i in 0..bars.len() {
            match (sma.value(i), middle.value(i)) {
                (Some(a), Some(b)) => assert_approx(a, b, DEFAULT_EPSILON),
                (None, None) => {}
                other => panic!("definedness differs at {i}: {other:?}"),
            }
        }
    }

    #[test]
    fn single_bar_is_computable() {
        let set = compute_indicators(&make_bars(&[10.0]), &IndicatorRequest::all()).unwrap();
        assert_eq!(set.get("ema_20").unwrap().value(0), Some(10.0));
        assert_eq!(set.get("sma_20").unwrap().value(0), None);
        assert_eq!(set.get("rsi_14").unwrap().value(0), None);
        assert_eq!(set.waves, Some(vec![]));
    }

    #[test]
    fn engine_series_match_indicator_types() {
        let bars = trending(40);
        let set = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();

        let singles: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(SMA_PERIOD)),
            Box::new(Ema::new(EMA_PERIOD)),
            Box::new(Bollinger::upper(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER)),
            Box::new(Bollinger::middle(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER)),
            Box::new(Bollinger::lower(BOLLINGER_PERIOD, BOLLINGER_MULTIPLIER)),
            Box::new(Macd::line(MACD_FAST, MACD_SLOW, MACD_SIGNAL)),
            Box::new(Macd::signal(MACD_FAST, MACD_SLOW, MACD_SIGNAL)),
            Box::new(Rsi::new(RSI_PERIOD)),
        ];
        let names: Vec<&str> = singles.iter().map(|i| i.name()).collect();
        assert_eq!(set.names(), names);
        for indicator in &singles {
            let engine = set.get(indicator.name()).unwrap();
            assert_eq!(engine, &indicator.series(&bars), "{} differs", indicator.name());
        }
    }
}
