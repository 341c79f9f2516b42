//! Wave points: a heuristic local-extrema finder over closes.
//!
//! Scans interior bars only. A bar is a peak when its close is strictly above
//! both neighbours and a trough when strictly below both; flat runs never
//! qualify. An extremum of the same kind as the last recorded one is skipped,
//! so recorded points alternate. Scanning stops after `MAX_WAVE_POINTS`.

use crate::domain::{Bar, ExtremumKind, WavePoint};

pub const MAX_WAVE_POINTS: usize = 5;

/// Classify the middle close of a three-close window.
fn classify(prev: f64, curr: f64, next: f64) -> Option<ExtremumKind> {
    if prev < curr && curr > next {
        Some(ExtremumKind::Peak)
    } else if prev > curr && curr < next {
        Some(ExtremumKind::Trough)
    } else {
        None
    }
}

/// Find up to five alternating wave points, in date order.
pub fn wave_points(bars: &[Bar]) -> Vec<WavePoint> {
    let mut points: Vec<WavePoint> = Vec::with_capacity(MAX_WAVE_POINTS);
    let mut last_kind: Option<ExtremumKind> = None;

    for window in bars.windows(3) {
        let bar = &window[1];
        let Some(kind) = classify(window[0].close, bar.close, window[2].close) else {
            continue;
        };
        if last_kind == Some(kind) {
            continue;
        }
        points.push(WavePoint {
            date: bar.date,
            price: bar.close,
            ordinal: points.len() as u8 + 1,
            kind,
        });
        last_kind = Some(kind);
        if points.len() == MAX_WAVE_POINTS {
            break;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn strict_extrema_in_mixed_path() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 15.0, 9.0, 9.0, 9.0, 20.0]);
        let points = wave_points(&bars);

        let summary: Vec<(chrono::NaiveDate, f64, u8)> =
            points.iter().map(|p| (p.date, p.price, p.ordinal)).collect();
        assert_eq!(
            summary,
            vec![
                (bars[1].date, 12.0, 1),
                (bars[2].date, 11.0, 2),
                (bars[3].date, 15.0, 3),
            ]
        );
        assert_eq!(points[0].kind, ExtremumKind::Peak);
        assert_eq!(points[1].kind, ExtremumKind::Trough);
        assert_eq!(points[2].kind, ExtremumKind::Peak);
    }

    #[test]
    fn flat_runs_never_qualify() {
        let bars = make_bars(&[5.0, 5.0, 5.0, 5.0]);
        assert!(wave_points(&bars).is_empty());
    }

    #[test]
    fn endpoints_are_never_extrema() {
        // The last bar is the maximum but has no right-hand neighbour.
        let bars = make_bars(&[3.0, 2.0, 4.0, 9.0]);
        let points = wave_points(&bars);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 2.0);
        assert_eq!(points[0].kind, ExtremumKind::Trough);
    }

    #[test]
    fn same_kind_repeats_are_skipped() {
        // Two peaks separated by a flat bottom: no trough in between, so the
        // second peak is dropped.
        let bars = make_bars(&[1.0, 5.0, 2.0, 2.0, 6.0, 1.0]);
        let points = wave_points(&bars);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 5.0);
    }

    #[test]
    fn stops_after_five_points() {
        let closes: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 1.0 } else { 2.0 }).collect();
        let points = wave_points(&make_bars(&closes));
        assert_eq!(points.len(), MAX_WAVE_POINTS);
        let ordinals: Vec<u8> = points.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
        assert_eq!(points[4].label(), "W5");
    }

    #[test]
    fn too_short_input_has_no_points() {
        assert!(wave_points(&make_bars(&[1.0, 2.0])).is_empty());
        assert!(wave_points(&[]).is_empty());
    }
}
