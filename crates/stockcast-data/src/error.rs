//! Data source error types.

use thiserror::Error;

/// Errors raised while fetching or decoding historical price data.
///
/// Every variant means the same thing to the forecast pipeline: the series
/// is unavailable. The distinctions exist for logging and tests.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// API error from data provider
    #[error("API error [{code}]: {description}")]
    ApiError { code: String, description: String },

    /// No usable bars in the response (unknown or delisted symbol, or a
    /// response where every bar had missing fields)
    #[error("No data returned")]
    NoData,

    /// Interval not offered for the requested lookback range
    #[error("Interval {interval} is not available for range {range}")]
    UnsupportedInterval { range: String, interval: String },
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
