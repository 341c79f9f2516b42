//! Domain types for ChartLab

pub mod bar;
pub mod series;
pub mod wave;

pub use bar::Bar;
pub use series::{Point, Series};
pub use wave::{ExtremumKind, WavePoint};

/// Symbol type alias
pub type Symbol = String;
