//! SVG chart rendering for price history and forecast bundles.

use std::path::Path;

use chrono::NaiveDate;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::{RangedCoordf64, RangedDate};
use plotters::prelude::*;
use thiserror::Error;

use stockcast_data::PriceSeries;
use stockcast_forecast::ForecastBundle;

const CHART_SIZE: (u32, u32) = (1024, 640);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

type DateChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedDate<NaiveDate>, RangedCoordf64>>;

/// Error type for chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Nothing to draw")]
    EmptySeries,

    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Date and value bounds across a set of series.
fn bounds(series: &[&PriceSeries]) -> Option<(NaiveDate, NaiveDate, f64, f64)> {
    let mut first: Option<NaiveDate> = None;
    let mut last: Option<NaiveDate> = None;
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in series {
        for p in s.iter() {
            first = Some(first.map_or(p.date, |d| d.min(p.date)));
            last = Some(last.map_or(p.date, |d| d.max(p.date)));
            lo = lo.min(p.value);
            hi = hi.max(p.value);
        }
    }
    let (first, last) = (first?, last?);
    if (hi - lo).abs() < f64::EPSILON {
        // Flat series still needs a drawable span.
        lo -= 1.0;
        hi += 1.0;
    }
    Some((first, last, lo, hi))
}

fn draw_line(
    chart: &mut DateChart<'_, '_>,
    series: &PriceSeries,
    color: RGBColor,
    label: &str,
) -> Result<(), ChartError> {
    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.value)),
            &color,
        ))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label(label.to_string())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    Ok(())
}

/// Render the train/test/predictions/forecast chart to an SVG file.
pub fn render_forecast_chart(
    path: &Path,
    symbol: &str,
    bundle: &ForecastBundle,
) -> Result<(), ChartError> {
    let (first, last, lo, hi) = bounds(&[
        &bundle.train,
        &bundle.test,
        &bundle.test_predictions,
        &bundle.forecast,
    ])
    .ok_or(ChartError::EmptySeries)?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} price forecast", symbol), ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, lo..hi)
        .map_err(|e| ChartError::Render(e.to_string()))?;
    chart
        .configure_mesh()
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    draw_line(&mut chart, &bundle.train, BLUE, "Train")?;
    draw_line(&mut chart, &bundle.test, ORANGE, "Test")?;
    draw_line(&mut chart, &bundle.test_predictions, GREEN, "Test Predictions")?;
    draw_line(&mut chart, &bundle.forecast, RED, "Forecast (90 days)")?;

    chart
        .configure_series_labels()
        .background_style(WHITE)
        .border_style(BLACK)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}

/// Render a close-price history chart to an SVG file.
pub fn render_history_chart(
    path: &Path,
    symbol: &str,
    series: &PriceSeries,
) -> Result<(), ChartError> {
    let (first, last, lo, hi) = bounds(&[series]).ok_or(ChartError::EmptySeries)?;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} closing price", symbol), ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, lo..hi)
        .map_err(|e| ChartError::Render(e.to_string()))?;
    chart
        .configure_mesh()
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    draw_line(&mut chart, series, BLUE, "Close")?;

    chart
        .configure_series_labels()
        .background_style(WHITE)
        .border_style(BLACK)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_history_chart_writes_svg() {
        let series = PriceSeries::from_daily_values(
            date(2024, 1, 1),
            &[100.0, 101.0, 99.5, 102.0, 103.5],
        );
        let path = std::env::temp_dir().join("stockcast_history_chart.svg");

        render_history_chart(&path, "TEST.BO", &series).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
    }

    #[test]
    fn test_forecast_chart_writes_svg() {
        let bundle = ForecastBundle {
            train: PriceSeries::from_daily_values(date(2024, 1, 1), &[100.0, 101.0, 102.0]),
            test: PriceSeries::from_daily_values(date(2024, 1, 3), &[102.0, 103.0]),
            test_predictions: PriceSeries::from_daily_values(date(2024, 1, 3), &[101.8, 102.6]),
            forecast: PriceSeries::from_daily_values(
                date(2024, 1, 3),
                &[101.8, 102.6, 103.1, 103.4],
            ),
        };
        let path = std::env::temp_dir().join("stockcast_forecast_chart.svg");

        render_forecast_chart(&path, "TEST.BO", &bundle).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let path = std::env::temp_dir().join("stockcast_empty_chart.svg");
        let result = render_history_chart(&path, "TEST.BO", &PriceSeries::empty());
        assert!(matches!(result, Err(ChartError::EmptySeries)));
    }

    #[test]
    fn test_flat_series_renders() {
        let series = PriceSeries::from_daily_values(date(2024, 1, 1), &[50.0, 50.0, 50.0]);
        let path = std::env::temp_dir().join("stockcast_flat_chart.svg");
        assert!(render_history_chart(&path, "TEST.BO", &series).is_ok());
    }
}
