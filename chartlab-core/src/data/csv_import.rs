//! CSV import provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` files with a `date,open,high,low,close` header
//! (extra columns are ignored). Useful offline and for fixtures.

use super::provider::{check_range, finalize_bars, DataError, DataProvider, DataSource, FetchResult};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    fn read_file(symbol: &str, path: &Path) -> Result<Vec<Bar>, DataError> {
        let csv_err = |e: csv::Error| DataError::Csv {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        };
        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        reader
            .deserialize::<CsvRow>()
            .map(|row| {
                let row = row.map_err(csv_err)?;
                Ok(Bar {
                    date: row.date,
                    open: row.open,
                    high: row.high,
                    low: row.low,
                    close: row.close,
                })
            })
            .collect()
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, DataError> {
        check_range(start, end)?;
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }
        let bars = Self::read_file(symbol, &path)?;
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: finalize_bars(symbol, bars, start, end)?,
            source: DataSource::CsvImport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reads_and_filters_range() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("SBER.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-05,10,11,9,10.5,100\n\
             2024-01-03,9,10,8,9.5,100\n\
             2024-01-04,9.5,10.5,9,10,100\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("SBER", d(2024, 1, 3), d(2024, 1, 4)).unwrap();
        assert_eq!(result.source, DataSource::CsvImport);
        let closes: Vec<f64> = result.bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![9.5, 10.0]);
    }

    #[test]
    fn missing_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("NOPE", d(2024, 1, 1), d(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "date,open,high,low,close\nnot-a-date,1,2,0,1\n").unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("BAD", d(2024, 1, 1), d(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, DataError::Csv { .. }));
    }

    #[test]
    fn unreadable_file_is_csv_error() {
        // A directory where the file should be fails on read, not on open.
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("DIR.csv")).unwrap();
        let provider = CsvProvider::new(dir.path());
        let err = provider.fetch("DIR", d(2024, 1, 1), d(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, DataError::Csv { ref symbol, .. } if symbol == "DIR"));
    }
}
