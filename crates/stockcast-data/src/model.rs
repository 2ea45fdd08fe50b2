//! Market data model types: lookback ranges, bar intervals, OHLCV quotes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Lookback window for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Range {
    /// Last trading day
    Day1,
    /// Last five trading days
    Day5,
    /// One month
    Month1,
    /// Three months
    Month3,
    /// Six months
    Month6,
    /// One year
    Year1,
    /// Two years
    Year2,
    /// Five years
    Year5,
    /// Ten years
    Year10,
    /// Full listing history
    Max,
}

impl Range {
    /// Convert to the provider's API string representation.
    pub fn as_yahoo_str(&self) -> &'static str {
        match self {
            Range::Day1 => "1d",
            Range::Day5 => "5d",
            Range::Month1 => "1mo",
            Range::Month3 => "3mo",
            Range::Month6 => "6mo",
            Range::Year1 => "1y",
            Range::Year2 => "2y",
            Range::Year5 => "5y",
            Range::Year10 => "10y",
            Range::Max => "max",
        }
    }

    /// All lookback ranges, in ascending order of span.
    pub fn all() -> &'static [Range] {
        &[
            Range::Day1,
            Range::Day5,
            Range::Month1,
            Range::Month3,
            Range::Month6,
            Range::Year1,
            Range::Year2,
            Range::Year5,
            Range::Year10,
            Range::Max,
        ]
    }

    /// Bar intervals the provider accepts for this lookback range.
    ///
    /// Intraday bars are only served for short ranges; long ranges are
    /// restricted to daily and coarser bars.
    pub fn intervals(&self) -> &'static [Interval] {
        match self {
            Range::Day1 | Range::Day5 => &[
                Interval::Minute1,
                Interval::Minute2,
                Interval::Minute5,
                Interval::Minute15,
                Interval::Minute30,
                Interval::Minute60,
                Interval::Minute90,
            ],
            Range::Month1 => &[
                Interval::Minute30,
                Interval::Minute60,
                Interval::Minute90,
                Interval::Daily,
            ],
            _ => &[
                Interval::Daily,
                Interval::Day5,
                Interval::Weekly,
                Interval::Monthly,
            ],
        }
    }

    /// Whether `interval` is accepted for this range.
    pub fn supports(&self, interval: Interval) -> bool {
        self.intervals().contains(&interval)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_yahoo_str())
    }
}

impl std::str::FromStr for Range {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Range::Day1),
            "5d" => Ok(Range::Day5),
            "1mo" => Ok(Range::Month1),
            "3mo" => Ok(Range::Month3),
            "6mo" => Ok(Range::Month6),
            "1y" => Ok(Range::Year1),
            "2y" => Ok(Range::Year2),
            "5y" => Ok(Range::Year5),
            "10y" => Ok(Range::Year10),
            "max" => Ok(Range::Max),
            other => Err(DataError::ParseError(format!(
                "unknown lookback range: {}",
                other
            ))),
        }
    }
}

/// Time interval between bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    /// 1 minute bars
    Minute1,
    /// 2 minute bars
    Minute2,
    /// 5 minute bars
    Minute5,
    /// 15 minute bars
    Minute15,
    /// 30 minute bars
    Minute30,
    /// 60 minute bars
    Minute60,
    /// 90 minute bars
    Minute90,
    /// Daily bars
    Daily,
    /// 5 day bars
    Day5,
    /// Weekly bars
    Weekly,
    /// Monthly bars
    Monthly,
}

impl Interval {
    /// Convert to the provider's API string representation.
    pub fn as_yahoo_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Daily => "1d",
            Interval::Day5 => "5d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_yahoo_str())
    }
}

impl std::str::FromStr for Interval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::Minute1),
            "2m" => Ok(Interval::Minute2),
            "5m" => Ok(Interval::Minute5),
            "15m" => Ok(Interval::Minute15),
            "30m" => Ok(Interval::Minute30),
            "60m" => Ok(Interval::Minute60),
            "90m" => Ok(Interval::Minute90),
            "1d" => Ok(Interval::Daily),
            "5d" => Ok(Interval::Day5),
            "1wk" => Ok(Interval::Weekly),
            "1mo" => Ok(Interval::Monthly),
            other => Err(DataError::ParseError(format!(
                "unknown bar interval: {}",
                other
            ))),
        }
    }
}

/// A single OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Calendar date of the bar (UTC)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Adjusted closing price (accounts for splits/dividends)
    pub adj_close: f64,
    /// Trading volume
    pub volume: u64,
}

impl Quote {
    /// Create a new quote.
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        }
    }
}
