//! # stockcast
//!
//! Command-line interface for the stockcast forecasting pipeline: fetch
//! historical bars, run the autoregressive forecast, and render the results
//! as text, JSON, or SVG charts.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockcast_data::{fetch_history, Interval, PriceSeries, Range, YahooFinance};
use stockcast_forecast::run_forecast;

mod catalog;
mod chart;
mod display;

use catalog::CatalogCache;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Autoregressive stock price forecasting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch two years of history and produce test predictions plus a
    /// 90-day forecast
    Forecast {
        /// Ticker symbol (e.g. RELIANCE.BO), or a bare security code when
        /// --exchange is given
        ticker: String,

        /// Append an exchange suffix to a bare security code (bse or nse)
        #[arg(short, long)]
        exchange: Option<String>,

        /// Write the forecast bundle as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render the train/test/forecast chart as SVG
        #[arg(short, long)]
        chart: Option<PathBuf>,
    },

    /// Show historical bars for a ticker
    History {
        /// Ticker symbol
        ticker: String,

        /// Lookback range (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, max)
        #[arg(short, long, default_value = "1y")]
        range: String,

        /// Bar interval (1m, 2m, 5m, 15m, 30m, 60m, 90m, 1d, 5d, 1wk, 1mo)
        #[arg(short, long, default_value = "1d")]
        interval: String,

        /// Render the close-price chart as SVG
        #[arg(short, long)]
        chart: Option<PathBuf>,
    },

    /// List the ticker catalog
    Tickers {
        /// Catalog CSV path with Security Code and Issuer Name columns
        #[arg(short, long, default_value = "data/equity_issuers.csv")]
        catalog: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Forecast {
            ticker,
            exchange,
            output,
            chart,
        } => cmd_forecast(&ticker, exchange.as_deref(), output, chart),
        Commands::History {
            ticker,
            range,
            interval,
            chart,
        } => cmd_history(&ticker, &range, &interval, chart),
        Commands::Tickers { catalog } => cmd_tickers(&catalog),
    };

    if let Err(message) = result {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn cmd_forecast(
    ticker: &str,
    exchange: Option<&str>,
    output: Option<PathBuf>,
    chart_path: Option<PathBuf>,
) -> CliResult<()> {
    let symbol = resolve_symbol(ticker, exchange)?;
    let source = YahooFinance::new();

    let bundle = match run_forecast(&source, &symbol) {
        Some(bundle) if display::is_displayable(&bundle) => bundle,
        _ => {
            display::print_unavailable(&symbol);
            return Ok(());
        }
    };

    display::print_forecast_summary(&symbol, &bundle);

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| e.to_string())?;
        serde_json::to_writer_pretty(BufWriter::new(file), &bundle)
            .map_err(|e| e.to_string())?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = chart_path {
        chart::render_forecast_chart(&path, &symbol, &bundle).map_err(|e| e.to_string())?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_history(
    ticker: &str,
    range: &str,
    interval: &str,
    chart_path: Option<PathBuf>,
) -> CliResult<()> {
    let range: Range = range.parse().map_err(|e: stockcast_data::DataError| e.to_string())?;
    let interval: Interval = interval
        .parse()
        .map_err(|e: stockcast_data::DataError| e.to_string())?;

    let quotes = fetch_history(ticker, range, interval).map_err(|e| e.to_string())?;

    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    for q in &quotes {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            q.date, q.open, q.high, q.low, q.close, q.volume
        );
    }

    if let Some(path) = chart_path {
        let series = PriceSeries::from_quotes(&quotes);
        chart::render_history_chart(&path, ticker, &series).map_err(|e| e.to_string())?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_tickers(catalog_path: &std::path::Path) -> CliResult<()> {
    let mut cache = CatalogCache::new();
    let entries = cache.load(catalog_path).map_err(|e| e.to_string())?;

    for entry in entries {
        println!("{:>10}  {}", entry.code, entry.name);
    }
    Ok(())
}

/// Build a full ticker symbol from a catalog code and an exchange name.
fn resolve_symbol(ticker: &str, exchange: Option<&str>) -> CliResult<String> {
    match exchange {
        None => Ok(ticker.to_string()),
        Some(name) => match name.to_ascii_lowercase().as_str() {
            "bse" => Ok(format!("{}.BO", ticker)),
            "nse" => Ok(format!("{}.NS", ticker)),
            other => Err(format!("unknown exchange '{}', expected bse or nse", other)),
        },
    }
}
