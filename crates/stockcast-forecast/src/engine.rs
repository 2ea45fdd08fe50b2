//! The forecast pipeline: fetch, regularize, split, fit, predict.
//!
//! [`try_run_forecast`] surfaces the typed error taxonomy for tests and
//! logging; [`run_forecast`] is the external contract — a complete
//! [`ForecastBundle`] or nothing, never a partial result.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stockcast_data::{HistorySource, Interval, PriceSeries, Range};

use crate::autoreg::AutoReg;
use crate::error::{EngineError, ForecastError};
use crate::split::split_train_test;

/// Lag order of the autoregressive model.
pub const LAG_ORDER: usize = 250;

/// Calendar days forecast past the end of the test partition.
pub const FORECAST_HORIZON_DAYS: usize = 90;

/// Lookback window fetched for every forecast.
pub const HISTORY_RANGE: Range = Range::Year2;

/// Everything `run_forecast` produces, as one unit.
///
/// The four series are only ever present together. `test_predictions`
/// covers exactly the test partition's date span; `forecast` starts on the
/// same date and runs [`FORECAST_HORIZON_DAYS`] further, and its leading
/// values are identical to `test_predictions` because both come from the
/// same deterministic rolling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Training partition of the observed series
    pub train: PriceSeries,
    /// Test partition of the observed series
    pub test: PriceSeries,
    /// Dynamic predictions over the test partition's dates
    pub test_predictions: PriceSeries,
    /// Dynamic predictions through the test partition plus the horizon
    pub forecast: PriceSeries,
}

/// Run the full pipeline, reporting failures as typed errors.
///
/// Fetches two years of daily bars, regularizes to a strict daily calendar,
/// splits 90/10, fits an order-[`LAG_ORDER`] autoregression on the training
/// partition, and produces one dynamic run from the first test date through
/// the horizon. The test-window predictions are the prefix of that run.
pub fn try_run_forecast(
    source: &dyn HistorySource,
    symbol: &str,
) -> Result<ForecastBundle, EngineError> {
    let quotes = source.history(symbol, HISTORY_RANGE, Interval::Daily)?;
    let series = PriceSeries::from_quotes(&quotes).regularize_daily();
    debug!(%symbol, days = series.len(), source = source.name(), "series regularized");

    if series.len() <= LAG_ORDER {
        return Err(ForecastError::InsufficientHistory {
            required: LAG_ORDER + 1,
            actual: series.len(),
        }
        .into());
    }

    let (train, test) = split_train_test(&series);
    let Some(start) = test.first_date() else {
        return Err(ForecastError::InsufficientHistory {
            required: LAG_ORDER + 1,
            actual: 0,
        }
        .into());
    };

    let mut model = AutoReg::new(LAG_ORDER)?;
    model.fit(&train.values())?;
    debug!(
        %symbol,
        train_len = train.len(),
        test_len = test.len(),
        sigma2 = model.residual_variance(),
        "model fitted"
    );

    // One rolling run covers both outputs; the first dynamically predicted
    // date is the boundary observation shared by train and test.
    let steps = test.len() + FORECAST_HORIZON_DAYS;
    let predicted = model.predict_dynamic(train.len() - 1, steps)?;

    let forecast = PriceSeries::from_daily_values(start, &predicted);
    let test_predictions = forecast.slice(0, test.len());

    Ok(ForecastBundle {
        train,
        test,
        test_predictions,
        forecast,
    })
}

/// Run the full pipeline with the all-or-nothing external contract.
///
/// Any failure — unavailable data, too little history, a degenerate fit —
/// is logged and collapsed to `None`. Callers never see partial results.
pub fn run_forecast(source: &dyn HistorySource, symbol: &str) -> Option<ForecastBundle> {
    match try_run_forecast(source, symbol) {
        Ok(bundle) => Some(bundle),
        Err(error) => {
            warn!(%symbol, %error, "forecast unavailable");
            None
        }
    }
}
