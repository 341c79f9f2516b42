//! MOEX ISS data provider.
//!
//! Fetches daily candles for shares from the Moscow Exchange ISS candles
//! endpoint. The response is a column-oriented table:
//! `{"candles": {"columns": [...], "data": [[...], ...]}}`, paged at most
//! `ISS_PAGE_SIZE` rows at a time via the `start` offset parameter.

use super::provider::{check_range, finalize_bars, DataError, DataProvider, DataSource, FetchResult};
use crate::domain::Bar;
use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const MOEX_BASE_URL: &str = "https://iss.moex.com/iss/engines/stock/markets/shares/securities";

/// ISS candle interval code for daily bars.
const DAILY_INTERVAL: u32 = 24;

/// Maximum rows the ISS returns per request.
const ISS_PAGE_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
struct CandlesResponse {
    candles: CandleTable,
}

#[derive(Debug, Deserialize)]
struct CandleTable {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// Column positions of the fields we read.
struct Columns {
    begin: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn locate(columns: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| {
            columns.iter().position(|c| c == name).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("candles table has no '{name}' column"))
            })
        };
        Ok(Self {
            begin: find("begin")?,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
        })
    }
}

/// MOEX ISS data provider.
pub struct MoexProvider {
    client: reqwest::blocking::Client,
    base_url: Url,
    max_retries: u32,
    base_delay: Duration,
    max_pages: usize,
}

impl MoexProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("chartlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(MOEX_BASE_URL)
            .map_err(|e| DataError::InvalidUrl(format!("{MOEX_BASE_URL}: {e}")))?;

        Ok(Self {
            client,
            base_url,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_pages: 20,
        })
    }

    /// Point the provider at a different ISS host (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// `<base>/<symbol>/candles.json`, with the symbol percent-encoded as a
    /// single path segment.
    fn candles_url(&self, symbol: &str) -> Result<Url, DataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DataError::InvalidUrl(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(symbol)
            .push("candles.json");
        Ok(url)
    }

    /// Convert one page of the candles table into bars.
    fn parse_table(symbol: &str, table: &CandleTable) -> Result<Vec<Bar>, DataError> {
        let cols = Columns::locate(&table.columns)?;
        let width = table.columns.len();

        table
            .data
            .iter()
            .map(|row| {
                if row.len() < width {
                    return Err(DataError::ResponseFormatChanged(format!(
                        "{symbol}: candle row has {} fields, expected {width}",
                        row.len()
                    )));
                }
                let begin = row[cols.begin].as_str().ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("{symbol}: 'begin' is not a string"))
                })?;
                let date = begin
                    .get(..10)
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .ok_or_else(|| {
                        DataError::ResponseFormatChanged(format!("{symbol}: bad candle date '{begin}'"))
                    })?;
                // Missing prices become NaN and the bar is dropped as void.
                let price = |idx: usize| row[idx].as_f64().unwrap_or(f64::NAN);
                Ok(Bar {
                    date,
                    open: price(cols.open),
                    high: price(cols.high),
                    low: price(cols.low),
                    close: price(cols.close),
                })
            })
            .collect()
    }

    /// Fetch one page with retry on transient failures.
    fn fetch_page(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        offset: usize,
    ) -> Result<CandleTable, DataError> {
        let url = self.candles_url(symbol)?;
        let from = start.format("%Y-%m-%d").to_string();
        let till = end.format("%Y-%m-%d").to_string();
        let interval = DAILY_INTERVAL.to_string();
        let offset_param = offset.to_string();
        let query = [
            ("from", from.as_str()),
            ("till", till.as_str()),
            ("interval", interval.as_str()),
            ("start", offset_param.as_str()),
        ];

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                warn!(%symbol, attempt, ?delay, "retrying MOEX request");
                std::thread::sleep(delay);
            }

            match self.client.get(url.clone()).query(&query).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        last_error = Some(DataError::HttpStatus {
                            symbol: symbol.to_string(),
                            status: status.as_u16(),
                        });
                        continue;
                    }

                    if !status.is_success() {
                        return Err(DataError::HttpStatus {
                            symbol: symbol.to_string(),
                            status: status.as_u16(),
                        });
                    }

                    let body: CandlesResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse candles for {symbol}: {e}"
                        ))
                    })?;
                    return Ok(body.candles);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::NetworkUnreachable("max retries exceeded".into())))
    }
}

impl DataProvider for MoexProvider {
    fn name(&self) -> &str {
        "moex_iss"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<FetchResult, DataError> {
        check_range(start, end)?;

        let mut bars = Vec::new();
        for page in 0..self.max_pages {
            let offset = page * ISS_PAGE_SIZE;
            let table = self.fetch_page(symbol, start, end, offset)?;
            let rows = table.data.len();
            debug!(%symbol, offset, rows, "fetched MOEX candle page");
            bars.extend(Self::parse_table(symbol, &table)?);
            if rows < ISS_PAGE_SIZE {
                break;
            }
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: finalize_bars(symbol, bars, start, end)?,
            source: DataSource::Moex,
        })
    }
}
