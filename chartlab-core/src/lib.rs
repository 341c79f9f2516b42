//! ChartLab Core: domain types, indicator engine, panel composer and data sources.
//!
//! This crate contains everything needed to turn daily bars into a chart
//! description:
//! - Domain types (bars, named series, wave points)
//! - Indicators (SMA, EMA, Bollinger, MACD, RSI, wave points)
//! - Indicator engine driven by an `IndicatorRequest`
//! - Panel composer producing a renderer-agnostic `Chart`
//! - Data providers (MOEX ISS, CSV import, synthetic)

pub mod chart;
pub mod composer;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;

pub use chart::{build_chart, compose_batch, ChartOptions};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across the batch worker pool are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::WavePoint>();
        require_sync::<domain::WavePoint>();

        require_send::<engine::IndicatorRequest>();
        require_sync::<engine::IndicatorRequest>();
        require_send::<engine::IndicatorSet>();
        require_sync::<engine::IndicatorSet>();

        require_send::<composer::Chart>();
        require_sync::<composer::Chart>();
        require_send::<ChartOptions>();
        require_sync::<ChartOptions>();

        require_send::<data::MoexProvider>();
        require_sync::<data::MoexProvider>();
        require_send::<data::CsvProvider>();
        require_sync::<data::CsvProvider>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }

    /// Providers are used behind trait objects by the batch runner.
    #[test]
    fn providers_are_object_safe() {
        let providers: Vec<Box<dyn data::DataProvider>> = vec![
            Box::new(data::SyntheticProvider::new(1)),
            Box::new(data::CsvProvider::new(".")),
        ];
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["synthetic", "csv_import"]);
    }
}
