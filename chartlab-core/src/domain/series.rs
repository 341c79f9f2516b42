//! Series: a named, date-aligned sequence of optional values.
//!
//! A series always has exactly one point per source bar. Points that a
//! rolling computation cannot produce yet carry `None`, which serializes as
//! `null` so a renderer skips the point without shifting the date axis.

use super::bar::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One `(date, value)` slot of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    /// Pair computed values with the dates of the bars they were derived from.
    ///
    /// Panics if `values` is not exactly as long as `bars`: a shorter series
    /// would misalign every point after the gap.
    pub fn from_values(name: impl Into<String>, bars: &[Bar], values: Vec<Option<f64>>) -> Self {
        let name = name.into();
        assert_eq!(
            values.len(),
            bars.len(),
            "series '{name}' has {} values for {} bars",
            values.len(),
            bars.len()
        );
        let points = bars
            .iter()
            .zip(values)
            .map(|(bar, value)| Point {
                date: bar.date,
                value,
            })
            .collect();
        Self { name, points }
    }

    /// The close prices as a fully defined series.
    pub fn of_closes(name: impl Into<String>, bars: &[Bar]) -> Self {
        Self::from_values(name, bars, bars.iter().map(|b| Some(b.close)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value at a bar index; `None` when out of range or undefined.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of points carrying a value.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Index of the first defined point, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.points.iter().position(|p| p.value.is_some())
    }

    /// Most recent defined point.
    pub fn last_defined(&self) -> Option<(NaiveDate, f64)> {
        self.points
            .iter()
            .rev()
            .find_map(|p| p.value.map(|v| (p.date, v)))
    }
}
