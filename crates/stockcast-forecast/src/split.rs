//! Chronological train/test partitioning.

use stockcast_data::PriceSeries;

/// Share of the series assigned to the training partition.
pub const TRAIN_FRACTION: f64 = 0.9;

/// Split a series at `k = floor(0.9 * len)` into train `[0, k]` and test
/// `[k, len - 1]`.
///
/// The boundary observation at index `k` lands in both partitions, so
/// `train.len() + test.len() == len + 1`. The overlap is a documented
/// property of this pipeline and is relied on downstream: the test
/// partition's first date is the first dynamically predicted date.
pub fn split_train_test(series: &PriceSeries) -> (PriceSeries, PriceSeries) {
    if series.is_empty() {
        return (PriceSeries::empty(), PriceSeries::empty());
    }
    let k = (series.len() as f64 * TRAIN_FRACTION) as usize;
    let train = series.slice(0, k + 1);
    let test = series.slice(k, series.len());
    (train, test)
}
