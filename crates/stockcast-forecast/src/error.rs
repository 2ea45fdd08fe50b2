//! Forecast error types.
//!
//! The engine's external contract is all-or-nothing: every variant below is
//! collapsed to the single "unavailable" result at the `run_forecast`
//! boundary. The taxonomy exists so tests and logs can tell *why* a forecast
//! was withheld.

use stockcast_data::DataError;
use thiserror::Error;

/// Errors from model construction, fitting, and prediction.
#[derive(Debug, Clone, Error)]
pub enum ForecastError {
    /// Invalid lag order at construction
    #[error("Invalid lag order: {0}")]
    InvalidOrder(String),

    /// Series too short for the lag order
    #[error("Insufficient history: need at least {required} observations, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Numerical failure during least-squares estimation
    #[error("Least-squares fit failed: {0}")]
    FitFailure(String),

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Everything that can go wrong between the ticker symbol and the finished
/// forecast bundle. `run_forecast` normalizes all of it to `None`.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The history source returned no usable series
    #[error("data source: {0}")]
    Data(#[from] DataError),

    /// Fitting or predicting failed
    #[error("forecast model: {0}")]
    Forecast(#[from] ForecastError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_history_display() {
        let error = ForecastError::InsufficientHistory {
            required: 251,
            actual: 40,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient history: need at least 251 observations, got 40"
        );
    }

    #[test]
    fn test_not_fitted_display() {
        assert_eq!(
            ForecastError::NotFitted.to_string(),
            "Model must be fitted before prediction"
        );
    }

    #[test]
    fn test_engine_error_wraps_data_error() {
        let error: EngineError = DataError::NoData.into();
        assert_eq!(error.to_string(), "data source: No data returned");
    }

    #[test]
    fn test_engine_error_wraps_forecast_error() {
        let error: EngineError = ForecastError::NotFitted.into();
        assert_eq!(
            error.to_string(),
            "forecast model: Model must be fitted before prediction"
        );
    }
}
