//! Daily bar sources.
//!
//! Every source implements `DataProvider` and returns bars ascending by date
//! with unique dates, so the engine can consume them without further checks.

pub mod csv_import;
pub mod moex;
pub mod provider;
pub mod synthetic;
pub mod tickers;

pub use csv_import::CsvProvider;
pub use moex::{MoexProvider, MOEX_BASE_URL};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use synthetic::SyntheticProvider;
pub use tickers::parse_tickers;
