//! Date-indexed price series with strict-daily regularization.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Quote;

/// One observation: a calendar date and the value recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Closing price, or a model output standing in for one
    pub value: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// An ordered sequence of (date, value) pairs with strictly increasing dates.
///
/// Used both for observed closing prices and for model output series
/// (predictions and forecasts share the shape). After
/// [`PriceSeries::regularize_daily`] the series additionally has one entry
/// per calendar day over its span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create an empty series.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a series from raw points.
    ///
    /// Points are sorted by date; when the same date appears more than once
    /// the last value wins.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    /// Build a closing-price series from OHLCV quotes.
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        Self::from_points(
            quotes
                .iter()
                .map(|q| PricePoint::new(q.date, q.close))
                .collect(),
        )
    }

    /// Build a series of consecutive calendar days starting at `start`.
    pub fn from_daily_values(start: NaiveDate, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                PricePoint::new(start + Days::new(i as u64), value)
            })
            .collect();
        Self { points }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The observations, in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Iterate over the observations in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// The values alone, in date order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Copy out the observations at indices `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> PriceSeries {
        Self {
            points: self.points[start..end].to_vec(),
        }
    }

    /// Resample to a strict daily calendar over `[first_date, last_date]`,
    /// carrying the last known value forward across gaps (weekends,
    /// holidays). Nothing is filled before the first real observation.
    pub fn regularize_daily(&self) -> PriceSeries {
        let (Some(first), Some(last)) = (self.first_date(), self.last_date()) else {
            return PriceSeries::empty();
        };

        let mut filled = Vec::new();
        let mut source = self.points.iter().peekable();
        let mut carried = f64::NAN;
        let mut date = first;
        while date <= last {
            while let Some(next) = source.peek() {
                if next.date > date {
                    break;
                }
                carried = next.value;
                source.next();
            }
            filled.push(PricePoint::new(date, carried));
            date = date + Days::new(1);
        }
        PriceSeries { points: filled }
    }
}

impl IntoIterator for PriceSeries {
    type Item = PricePoint;
    type IntoIter = std::vec::IntoIter<PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
