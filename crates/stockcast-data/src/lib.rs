//! Historical market data for the stockcast forecasting pipeline.
//!
//! Fetches OHLCV history from Yahoo Finance, exposes it as date-indexed
//! closing-price series, and regularizes those series to a strict daily
//! calendar with forward-filled gaps — the shape the forecast engine
//! requires.

pub mod error;
pub mod model;
pub mod series;
pub mod source;
pub mod yahoo;

pub use error::{DataError, Result};
pub use model::{Interval, Quote, Range};
pub use series::{PricePoint, PriceSeries};
pub use source::HistorySource;
pub use yahoo::{fetch_history, YahooFinance};
