use analytics::{analyze_trend, detect_anomalies, ewma, rolling_average_with_min};
use chrono::{Duration, TimeZone, Utc};
use core_types::{DataPoint, TrendDirection};
use proptest::prelude::*;

fn hourly(values: &[f64]) -> Vec<DataPoint> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(start + Duration::hours(i as i64), *v))
        .collect()
}

proptest! {
    #[test]
    fn rolling_average_is_the_mean_of_each_window(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 0..60),
        window in 1usize..12,
        min_points in 1usize..6,
    ) {
        let input = hourly(&values);
        let out = rolling_average_with_min(&input, window, min_points).unwrap();

        let expected_len = (0..values.len())
            .filter(|i| (i + 1).min(window) >= min_points)
            .count();
        prop_assert_eq!(out.len(), expected_len);

        for point in &out {
            let i = input.iter().position(|p| p.timestamp == point.timestamp).unwrap();
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            let mean = slice.iter().sum::<f64>() / slice.len() as f64;
            prop_assert_eq!(point.value, mean);
            prop_assert_eq!(point.metadata_f64("windowSize"), Some(slice.len() as f64));
            prop_assert_eq!(point.metadata_f64("originalValue"), Some(values[i]));
        }
    }

    #[test]
    fn ewma_keeps_the_first_value(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..40),
        alpha in 0.01f64..=1.0,
    ) {
        let out = ewma(&hourly(&values), alpha).unwrap();
        prop_assert_eq!(out.len(), values.len());
        prop_assert_eq!(out[0].value, values[0]);
    }

    #[test]
    fn ewma_with_alpha_one_is_identity(values in prop::collection::vec(-1e6f64..1e6, 0..40)) {
        let out = ewma(&hourly(&values), 1.0).unwrap();
        let smoothed: Vec<f64> = out.iter().map(|p| p.value).collect();
        prop_assert_eq!(smoothed, values);
    }

    #[test]
    fn constant_series_never_has_anomalies(value in -1e6f64..1e6, len in 0usize..50) {
        let anomalies = detect_anomalies(&hourly(&vec![value; len]), 2.0).unwrap();
        prop_assert!(anomalies.is_empty());
    }

    #[test]
    fn trend_outputs_stay_in_range(values in prop::collection::vec(-1e3f64..1e3, 2..50)) {
        let trend = analyze_trend(&hourly(&values), None).unwrap();
        prop_assert!((-1.0..=1.0).contains(&trend.correlation));
        prop_assert!((0.0..=1.0).contains(&trend.confidence));
    }
}

#[test]
fn strictly_rising_series_trends_up() {
    let trend = analyze_trend(&hourly(&[0.1, 0.2, 0.35, 0.5, 0.55, 0.7]), None).unwrap();
    assert_eq!(trend.direction, TrendDirection::Increasing);
}
