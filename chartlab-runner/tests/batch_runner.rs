//! Batch runner integration: stub providers, partial failures, ordering.

use std::collections::HashMap;
use std::fs;

use chartlab_core::composer::{ChartType, PanelKind};
use chartlab_core::data::{DataError, DataProvider, DataSource, FetchResult, SyntheticProvider};
use chartlab_core::domain::Bar;
use chartlab_core::engine::IndicatorRequest;
use chartlab_core::ChartOptions;
use chartlab_runner::{run_batch, write_charts, BatchError, BatchRequest, ChartConfig};
use chrono::NaiveDate;

/// Serves fixed bars per symbol; unknown symbols have no data.
struct StubProvider {
    bars: HashMap<String, Vec<Bar>>,
}

impl DataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, DataError> {
        match self.bars.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: bars.clone(),
                source: DataSource::CsvImport,
            }),
            _ => Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            }),
        }
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.5).sin() * 3.0;
            Bar {
                date: d(2024, 1, 1) + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
            }
        })
        .collect()
}

fn stub() -> StubProvider {
    let mut map = HashMap::new();
    map.insert("AAA".to_string(), bars(40));
    map.insert("BBB".to_string(), Vec::new());
    map.insert("CCC".to_string(), bars(10));
    StubProvider { bars: map }
}

fn request(tickers: &[&str], parallel: bool) -> BatchRequest {
    BatchRequest {
        tickers: tickers.iter().map(|t| t.to_string()).collect(),
        start: d(2024, 1, 1),
        end: d(2024, 3, 1),
        options: ChartOptions {
            chart_type: ChartType::Line,
            indicators: IndicatorRequest::all(),
        },
        parallel,
    }
}

#[test]
fn symbol_without_data_is_skipped() {
    let report = run_batch(&stub(), &request(&["AAA", "BBB"], true));
    assert_eq!(report.symbols(), vec!["AAA"]);
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    let (symbol, err) = &report.failures[0];
    assert_eq!(symbol, "BBB");
    assert!(matches!(err, BatchError::Data(DataError::NoData { .. })));
}

#[test]
fn parallel_and_sequential_agree() {
    let tickers = ["CCC", "BBB", "AAA", "ZZZ"];
    let parallel = run_batch(&stub(), &request(&tickers, true));
    let sequential = run_batch(&stub(), &request(&tickers, false));

    assert_eq!(parallel.symbols(), vec!["CCC", "AAA"]);
    assert_eq!(parallel.charts, sequential.charts);
    let failed: Vec<&str> = sequential.failures.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(failed, vec!["BBB", "ZZZ"]);
}

#[test]
fn charts_carry_all_panels() {
    let report = run_batch(&stub(), &request(&["AAA"], false));
    assert!(report.is_complete());
    let chart = &report.charts[0];
    assert!(chart.panel(PanelKind::Macd).is_some());
    assert_eq!(chart.panel(PanelKind::Rsi).unwrap().row_index, 3);
}

#[test]
fn config_to_files_with_synthetic_source() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");
    let config = ChartConfig::from_toml(&format!(
        r#"
        [chart]
        tickers = ["sber", "gazp"]
        start_date = "2024-01-01"
        end_date = "2024-02-29"

        [indicators]
        sma = true
        macd = true

        [source]
        type = "synthetic"
        seed = 3

        [output]
        dir = "{}"
        "#,
        out.display()
    ))
    .unwrap();

    let provider = config.source.build().unwrap();
    let (start, end) = config.date_range(d(2024, 6, 1));
    let report = run_batch(
        provider.as_ref(),
        &BatchRequest {
            tickers: config.tickers(),
            start,
            end,
            options: config.chart_options(),
            parallel: config.output.parallel,
        },
    );
    assert_eq!(report.symbols(), vec!["SBER", "GAZP"]);

    let paths = write_charts(&config.output.dir, &report.charts).unwrap();
    assert_eq!(paths.len(), 2);
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&paths[0]).unwrap()).unwrap();
    assert_eq!(json["symbol"], "SBER");
    assert_eq!(json["panels"].as_array().unwrap().len(), 2);
}

#[test]
fn synthetic_inverted_range_fails_every_symbol() {
    let mut req = request(&["AAA", "BBB"], true);
    std::mem::swap(&mut req.start, &mut req.end);
    let report = run_batch(&SyntheticProvider::new(1), &req);
    assert!(report.charts.is_empty());
    assert!(report
        .failures
        .iter()
        .all(|(_, e)| matches!(e, BatchError::Data(DataError::InvalidRange { .. }))));
}
