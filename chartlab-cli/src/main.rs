//! ChartLab CLI: chart and inspect commands.
//!
//! Commands:
//! - `chart`: fetch bars for one or more tickers, compute indicators, write one JSON chart per ticker
//! - `inspect`: print the latest indicator values and wave points for one ticker

use anyhow::{bail, Context, Result};
use chartlab_core::composer::ChartType;
use chartlab_core::data::{parse_tickers, DataProvider};
use chartlab_core::engine::{compute_indicators, IndicatorRequest};
use chartlab_runner::config::DEFAULT_SEED;
use chartlab_runner::{run_batch, write_charts, BatchRequest, ChartConfig, SourceConfig};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "chartlab", about = "ChartLab CLI: technical indicator charts for daily bars")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build charts and write `<output-dir>/<SYMBOL>.json` per ticker.
    Chart {
        /// Tickers (e.g., SBER GAZP). Combined with --tickers.
        tickers: Vec<String>,

        /// Comma-separated tickers (e.g., "SBER, GAZP").
        #[arg(long = "tickers", value_name = "LIST")]
        ticker_list: Option<String>,

        #[command(flatten)]
        range: RangeArgs,

        /// Price trace style: line or candlestick.
        #[arg(long)]
        chart_type: Option<ChartType>,

        #[command(flatten)]
        indicators: IndicatorFlags,

        #[command(flatten)]
        source: SourceArgs,

        /// Path to a TOML config file. Flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for chart JSON. Defaults to ./charts.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Process tickers one at a time instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Print the latest indicator values and wave points for one ticker.
    Inspect {
        symbol: String,

        #[command(flatten)]
        range: RangeArgs,

        // Shows every indicator when no flag is given.
        #[command(flatten)]
        indicators: IndicatorFlags,

        #[command(flatten)]
        source: SourceArgs,

        /// Path to a TOML config file. Flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct RangeArgs {
    /// Start date (YYYY-MM-DD). Defaults to 60 days before the end.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
struct IndicatorFlags {
    /// Simple moving average (20).
    #[arg(long)]
    sma: bool,
    /// Exponential moving average (20).
    #[arg(long)]
    ema: bool,
    /// Bollinger bands (20, 2σ).
    #[arg(long)]
    bollinger: bool,
    /// MACD (12, 26, 9) in its own panel.
    #[arg(long)]
    macd: bool,
    /// RSI (14) in its own panel.
    #[arg(long)]
    rsi: bool,
    /// Wave point markers on the price panel.
    #[arg(long)]
    elliott: bool,
    /// Every indicator above.
    #[arg(long)]
    all: bool,
}

impl IndicatorFlags {
    fn request(&self) -> IndicatorRequest {
        if self.all {
            return IndicatorRequest::all();
        }
        IndicatorRequest {
            sma: self.sma,
            ema: self.ema,
            bollinger: self.bollinger,
            macd: self.macd,
            rsi: self.rsi,
            elliott: self.elliott,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Moex,
    Csv,
    Synthetic,
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Bar source. Defaults to moex, or csv when --data-dir is given.
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Directory of `<SYMBOL>.csv` files for the csv source.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for the synthetic source.
    #[arg(long)]
    seed: Option<u64>,
}

impl SourceArgs {
    /// Layer the source flags over the configured source.
    fn apply(&self, configured: SourceConfig) -> Result<SourceConfig> {
        let kind = match (self.source, &self.data_dir) {
            (Some(kind), _) => kind,
            (None, Some(_)) => SourceKind::Csv,
            (None, None) => return Ok(configured),
        };
        Ok(match kind {
            SourceKind::Moex => SourceConfig::Moex,
            SourceKind::Csv => {
                let dir = match (&self.data_dir, configured) {
                    (Some(dir), _) => dir.clone(),
                    (None, SourceConfig::Csv { dir }) => dir,
                    (None, _) => bail!("--source csv requires --data-dir"),
                };
                SourceConfig::Csv { dir }
            }
            SourceKind::Synthetic => {
                let seed = match (self.seed, configured) {
                    (Some(seed), _) => seed,
                    (None, SourceConfig::Synthetic { seed }) => seed,
                    (None, _) => DEFAULT_SEED,
                };
                SourceConfig::Synthetic { seed }
            }
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Commands::Chart {
            tickers,
            ticker_list,
            range,
            chart_type,
            indicators,
            source,
            config,
            output_dir,
            sequential,
        } => {
            let mut config = load_config(config, &range, &indicators, &source)?;
            config.chart.tickers.extend(tickers);
            if let Some(list) = ticker_list {
                config.chart.tickers.extend(parse_tickers(&list));
            }
            if let Some(chart_type) = chart_type {
                config.chart.chart_type = chart_type;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            if sequential {
                config.output.parallel = false;
            }
            run_chart(&config)
        }
        Commands::Inspect {
            symbol,
            range,
            indicators,
            source,
            config,
        } => {
            let config = load_config(config, &range, &indicators, &source)?;
            run_inspect(&config, &symbol)
        }
    }
}

/// Initialise the global tracing subscriber. `RUST_LOG` overrides the INFO default.
fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Read the config file (if any) and apply the flags shared by every command.
fn load_config(
    path: Option<PathBuf>,
    range: &RangeArgs,
    indicators: &IndicatorFlags,
    source: &SourceArgs,
) -> Result<ChartConfig> {
    let mut config = match path {
        Some(path) => ChartConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChartConfig::default(),
    };

    if range.start.is_some() {
        config.chart.start_date = range.start;
    }
    if range.end.is_some() {
        config.chart.end_date = range.end;
    }
    config.indicators = config.indicators.merge(indicators.request());
    config.source = source.apply(config.source)?;
    config.validate()?;
    Ok(config)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn run_chart(config: &ChartConfig) -> Result<()> {
    let tickers = config.tickers();
    if tickers.is_empty() {
        bail!("no tickers given: pass TICKERS, --tickers or [chart].tickers in --config");
    }

    let (start, end) = config.date_range(today());
    let provider = config.source.build()?;
    let report = run_batch(
        provider.as_ref(),
        &BatchRequest {
            tickers: tickers.clone(),
            start,
            end,
            options: config.chart_options(),
            parallel: config.output.parallel,
        },
    );

    if report.charts.is_empty() {
        bail!("no charts produced for {} ticker(s)", tickers.len());
    }

    let paths = write_charts(&config.output.dir, &report.charts)?;
    info!(written = paths.len(), dir = %config.output.dir.display(), "charts written");
    println!(
        "{} of {} chart(s) written to {}",
        paths.len(),
        tickers.len(),
        config.output.dir.display()
    );
    for (symbol, err) in &report.failures {
        println!("  skipped {symbol}: {err}");
    }
    Ok(())
}

fn run_inspect(config: &ChartConfig, symbol: &str) -> Result<()> {
    let symbol = symbol.trim().to_uppercase();
    let (start, end) = config.date_range(today());
    let request = if config.indicators.is_empty() {
        IndicatorRequest::all()
    } else {
        config.indicators
    };

    let provider: Box<dyn DataProvider> = config.source.build()?;
    let fetched = provider.fetch(&symbol, start, end)?;
    let set = compute_indicators(&fetched.bars, &request)?;

    // finalize_bars guarantees at least one bar.
    let (first, last) = match (fetched.bars.first(), fetched.bars.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => bail!("no bars for {symbol}"),
    };

    println!(
        "{symbol}  {} .. {}  ({} bars, {})",
        first.date,
        last.date,
        fetched.bars.len(),
        provider.name()
    );
    println!("  {:<16} {:>12}  {}", "close", format!("{:.2}", last.close), last.date);
    for series in set.series() {
        match series.last_defined() {
            Some((date, value)) => {
                println!("  {:<16} {:>12}  {date}", series.name, format!("{value:.2}"))
            }
            None => println!("  {:<16} {:>12}", series.name, "n/a"),
        }
    }

    if let Some(waves) = &set.waves {
        if waves.is_empty() {
            println!("Wave points: none");
        } else {
            println!("Wave points:");
            for wave in waves {
                println!(
                    "  {:<4} {}  {:<7} {:>10.2}",
                    wave.label(),
                    wave.date,
                    format!("{:?}", wave.kind).to_lowercase(),
                    wave.price
                );
            }
        }
    }

    Ok(())
}
