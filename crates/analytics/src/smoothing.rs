use core_types::DataPoint;
use serde_json::{Map, json};

use crate::error::AnalyticsError;

/// Simple moving average over a trailing window.
///
/// Equivalent to [`rolling_average_with_min`] with `min_data_points = 1`, so
/// every input index produces an output point.
pub fn rolling_average(
    data: &[DataPoint],
    window_size: usize,
) -> Result<Vec<DataPoint>, AnalyticsError> {
    rolling_average_with_min(data, window_size, 1)
}

/// Simple moving average over a trailing window of up to `window_size` points.
///
/// For each index `i` the window is `data[max(0, i - window_size + 1)..=i]`.
/// A point is emitted only when its window holds at least `min_data_points`
/// samples, so the first indices may be dropped but are never padded.
///
/// Each emitted point keeps the input timestamp and carries the metadata
/// `{ windowSize, originalValue }`, where `windowSize` is the actual length of
/// the window used.
pub fn rolling_average_with_min(
    data: &[DataPoint],
    window_size: usize,
    min_data_points: usize,
) -> Result<Vec<DataPoint>, AnalyticsError> {
    if window_size == 0 {
        return Err(AnalyticsError::InvalidArgument(
            "Window size must be positive".to_string(),
        ));
    }

    let mut smoothed = Vec::with_capacity(data.len());

    for (i, point) in data.iter().enumerate() {
        let start = (i + 1).saturating_sub(window_size);
        let window = &data[start..=i];
        if window.len() < min_data_points {
            continue;
        }

        let average = window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64;

        let mut metadata = Map::new();
        metadata.insert("windowSize".to_string(), json!(window.len()));
        metadata.insert("originalValue".to_string(), json!(point.value));
        smoothed.push(DataPoint::new(point.timestamp, average).with_metadata(metadata));
    }

    Ok(smoothed)
}

/// Exponentially weighted moving average.
///
/// The first output equals the first input. After that
/// `ewma[i] = alpha * value[i] + (1 - alpha) * ewma[i - 1]`, so `alpha = 1`
/// reproduces the input series. `alpha` must lie in `(0, 1]`.
pub fn ewma(data: &[DataPoint], alpha: f64) -> Result<Vec<DataPoint>, AnalyticsError> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(AnalyticsError::InvalidArgument(
            "Alpha must be between 0 and 1".to_string(),
        ));
    }

    let mut smoothed = Vec::with_capacity(data.len());
    let mut previous: Option<f64> = None;

    for point in data {
        let value = match previous {
            None => point.value,
            Some(prev) => alpha * point.value + (1.0 - alpha) * prev,
        };
        previous = Some(value);

        let mut metadata = Map::new();
        metadata.insert("alpha".to_string(), json!(alpha));
        metadata.insert("originalValue".to_string(), json!(point.value));
        smoothed.push(DataPoint::new(point.timestamp, value).with_metadata(metadata));
    }

    Ok(smoothed)
}
