//! Display policy and text output for forecast results.

use stockcast_forecast::ForecastBundle;

/// Warning shown whenever a forecast cannot be displayed.
pub const UNAVAILABLE_MESSAGE: &str = "Sorry! No forecast data available for";

/// Whether a bundle passes the display sanity gate.
///
/// A negative "price" anywhere in the model output means the extrapolation
/// went pathological; the whole bundle is rejected, same as if the engine
/// had produced nothing.
pub fn is_displayable(bundle: &ForecastBundle) -> bool {
    bundle.forecast.iter().all(|p| p.value >= 0.0)
        && bundle.test_predictions.iter().all(|p| p.value >= 0.0)
}

/// Print the unavailable warning for a symbol.
pub fn print_unavailable(symbol: &str) {
    println!("{} {}.", UNAVAILABLE_MESSAGE, symbol);
}

/// Print a short text summary of a displayable bundle.
pub fn print_forecast_summary(symbol: &str, bundle: &ForecastBundle) {
    println!("Forecast for {}", symbol);

    if let (Some(first), Some(last)) = (bundle.train.first_date(), bundle.train.last_date()) {
        println!("  Train: {:>5} days  {} .. {}", bundle.train.len(), first, last);
    }
    if let (Some(first), Some(last)) = (bundle.test.first_date(), bundle.test.last_date()) {
        println!("  Test:  {:>5} days  {} .. {}", bundle.test.len(), first, last);
    }

    if let (Some(actual), Some(predicted)) = (
        bundle.test.points().last(),
        bundle.test_predictions.points().last(),
    ) {
        println!(
            "  Close at test end:      {:>10.2} actual, {:>10.2} predicted",
            actual.value, predicted.value
        );
    }
    if let Some(end) = bundle.forecast.points().last() {
        println!(
            "  Forecast for {}: {:>10.2}",
            end.date, end.value
        );
    }
}
