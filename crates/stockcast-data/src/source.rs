//! History source trait definition.

use crate::error::Result;
use crate::model::{Interval, Quote, Range};

/// Trait for providers of historical price data.
///
/// The forecast engine consumes histories through this seam, which also lets
/// tests substitute in-memory fixtures for the network client.
pub trait HistorySource: Send + Sync {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    /// Fetch historical OHLCV bars for `symbol` over the given lookback
    /// range at the given interval. A single blocking attempt; retries are
    /// the caller's business.
    fn history(&self, symbol: &str, range: Range, interval: Interval) -> Result<Vec<Quote>>;
}
