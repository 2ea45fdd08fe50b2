//! Yahoo Finance history client.
//!
//! Fetches historical OHLCV bars from the Yahoo Finance chart API over a
//! blocking HTTP connection. One request per call, no retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use stockcast_data::{HistorySource, Interval, Range, YahooFinance};
//!
//! let client = YahooFinance::new();
//! let quotes = client.history("RELIANCE.BO", Range::Year2, Interval::Daily).unwrap();
//! println!("Got {} bars", quotes.len());
//! ```

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DataError, Result};
use crate::model::{Interval, Quote, Range};
use crate::source::HistorySource;

/// Chart API response envelope.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartSeries>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<OhlcColumns>,
    adjclose: Option<Vec<AdjCloseColumn>>,
}

/// Column-oriented bar arrays; entries are null for halted sessions.
#[derive(Debug, Deserialize)]
struct OhlcColumns {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseColumn {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance client.
#[derive(Debug, Clone)]
pub struct YahooFinance {
    base_url: String,
}

impl Default for YahooFinance {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooFinance {
    /// Create a client against the public chart endpoint.
    pub fn new() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
        }
    }

    /// Build the chart API URL for a symbol, lookback range, and interval.
    fn build_url(&self, symbol: &str, range: Range, interval: Interval) -> String {
        format!(
            "{}/{}?range={}&interval={}",
            self.base_url,
            symbol,
            range.as_yahoo_str(),
            interval.as_yahoo_str()
        )
    }

    /// Decode a chart API response body into quotes.
    ///
    /// Bars with any missing OHLCV field are skipped; a response with no
    /// usable bars is `NoData`.
    fn parse_response(&self, json: &str) -> Result<Vec<Quote>> {
        let response: ChartResponse =
            serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))?;

        if let Some(error) = response.chart.error {
            return Err(DataError::ApiError {
                code: error.code,
                description: error.description,
            });
        }

        let results = response.chart.result.ok_or(DataError::NoData)?;
        let series = results.first().ok_or(DataError::NoData)?;
        let timestamps = series.timestamp.as_deref().ok_or(DataError::NoData)?;
        let columns = series.indicators.quote.first().ok_or(DataError::NoData)?;
        let adj_close = series.indicators.adjclose.as_ref().and_then(|a| a.first());

        let mut quotes = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let open = columns.open.get(i).copied().flatten();
            let high = columns.high.get(i).copied().flatten();
            let low = columns.low.get(i).copied().flatten();
            let close = columns.close.get(i).copied().flatten();
            let volume = columns.volume.get(i).copied().flatten();
            let adj = adj_close
                .and_then(|a| a.adjclose.get(i))
                .copied()
                .flatten();

            let date = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| DataError::ParseError(format!("timestamp out of range: {}", ts)))?
                .date_naive();

            if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = (open, high, low, close, volume)
            {
                quotes.push(Quote::new(date, o, h, l, c, adj.unwrap_or(c), v));
            }
        }

        if quotes.is_empty() {
            return Err(DataError::NoData);
        }

        Ok(quotes)
    }
}

impl HistorySource for YahooFinance {
    fn name(&self) -> &str {
        "yahoo-finance"
    }

    fn history(&self, symbol: &str, range: Range, interval: Interval) -> Result<Vec<Quote>> {
        if !range.supports(interval) {
            return Err(DataError::UnsupportedInterval {
                range: range.to_string(),
                interval: interval.to_string(),
            });
        }

        let url = self.build_url(symbol, range, interval);
        debug!(%symbol, %range, %interval, "fetching history");

        // Yahoo rejects the default reqwest user agent.
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        let text = client
            .get(&url)
            .send()
            .and_then(|r| r.text())
            .map_err(|e| DataError::RequestFailed(e.to_string()))?;

        let quotes = self.parse_response(&text)?;
        debug!(%symbol, bars = quotes.len(), "history fetched");
        Ok(quotes)
    }
}

/// Convenience function: fetch bars with a throwaway client.
pub fn fetch_history(symbol: &str, range: Range, interval: Interval) -> Result<Vec<Quote>> {
    YahooFinance::new().history(symbol, range, interval)
}
