//! # stockcast-forecast
//!
//! Autoregressive forecasting over daily closing-price series.
//!
//! The pipeline splits a regularized series 90/10 in time order, fits a
//! fixed-order autoregression (250 lags) on the training partition by least
//! squares, then produces *dynamic* multi-step predictions: beyond the
//! observed history, each step's lagged inputs are the model's own earlier
//! outputs, so the test window and the 90-day horizon come from one rolling
//! run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stockcast_data::YahooFinance;
//! use stockcast_forecast::run_forecast;
//!
//! let source = YahooFinance::new();
//! match run_forecast(&source, "RELIANCE.BO") {
//!     Some(bundle) => println!("{} forecast days", bundle.forecast.len()),
//!     None => println!("no forecast available"),
//! }
//! ```

pub mod autoreg;
pub mod engine;
pub mod error;
mod linalg;
pub mod split;

pub use autoreg::AutoReg;
pub use engine::{
    run_forecast, try_run_forecast, ForecastBundle, FORECAST_HORIZON_DAYS, HISTORY_RANGE,
    LAG_ORDER,
};
pub use error::{EngineError, ForecastError, Result};
pub use split::{split_train_test, TRAIN_FRACTION};
