use core_types::DataPoint;
use serde_json::{Map, json};

use crate::error::AnalyticsError;
use crate::stats;

pub const DEFAULT_STD_DEV_THRESHOLD: f64 = 2.0;

/// Fewer samples than this cannot establish a baseline.
pub const MIN_ANOMALY_SAMPLES: usize = 3;

/// Flags points whose distance from the mean exceeds `std_dev_threshold`
/// population standard deviations.
///
/// Fewer than three points is not an error: there is no baseline, so nothing
/// is anomalous and the result is empty. A constant series has a standard
/// deviation of zero and likewise yields nothing.
///
/// Flagged points keep their timestamp and value; their metadata is replaced
/// with `{ zScore, mean, stdDev }`.
pub fn detect_anomalies(
    data: &[DataPoint],
    std_dev_threshold: f64,
) -> Result<Vec<DataPoint>, AnalyticsError> {
    if !(std_dev_threshold >= 0.0) {
        return Err(AnalyticsError::InvalidArgument(
            "Standard deviation threshold must be non-negative".to_string(),
        ));
    }
    if data.len() < MIN_ANOMALY_SAMPLES {
        return Ok(Vec::new());
    }

    let values: Vec<f64> = data.iter().map(|p| p.value).collect();
    let Some(mean) = stats::mean(&values) else {
        return Ok(Vec::new());
    };
    let std_dev = stats::population_std_dev(&values, mean);
    let limit = std_dev_threshold * std_dev;

    let anomalies: Vec<DataPoint> = data
        .iter()
        .filter(|p| (p.value - mean).abs() > limit)
        .map(|p| {
            let mut metadata = Map::new();
            let z_score = if std_dev > 0.0 {
                (p.value - mean) / std_dev
            } else {
                0.0
            };
            metadata.insert("zScore".to_string(), json!(z_score));
            metadata.insert("mean".to_string(), json!(mean));
            metadata.insert("stdDev".to_string(), json!(std_dev));
            DataPoint::new(p.timestamp, p.value).with_metadata(metadata)
        })
        .collect();

    if !anomalies.is_empty() {
        tracing::debug!(
            count = anomalies.len(),
            mean,
            std_dev,
            "Anomalies detected"
        );
    }

    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(values: &[f64]) -> Vec<DataPoint> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(start + Duration::minutes(i as i64 * 5), *v))
            .collect()
    }

    #[test]
    fn single_spike_is_flagged() {
        let input = series(&[1.0, 2.0, 2.0, 2.0, 1.0, 10.0, 2.0, 1.0]);
        let anomalies = detect_anomalies(&input, DEFAULT_STD_DEV_THRESHOLD).unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].value, 10.0);
        assert_eq!(anomalies[0].timestamp, input[5].timestamp);
        assert!(anomalies[0].metadata_f64("zScore").unwrap() > 2.0);
    }

    #[test]
    fn constant_series_has_no_anomalies() {
        let anomalies = detect_anomalies(&series(&[4.2; 10]), 2.0).unwrap();
        assert!(anomalies.is_empty());
    }

    #[test]
    fn too_few_points_is_empty_not_an_error() {
        assert!(detect_anomalies(&series(&[1.0, 100.0]), 0.5).unwrap().is_empty());
        assert!(detect_anomalies(&[], 2.0).unwrap().is_empty());
    }

    #[test]
    fn lower_threshold_flags_more_points() {
        let input = series(&[1.0, 2.0, 2.0, 2.0, 1.0, 10.0, 2.0, 1.0]);
        let strict = detect_anomalies(&input, 2.0).unwrap();
        let loose = detect_anomalies(&input, 0.5).unwrap();
        assert!(loose.len() > strict.len());
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(detect_anomalies(&series(&[1.0, 2.0, 3.0]), -1.0).is_err());
    }
}
