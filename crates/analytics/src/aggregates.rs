use core_types::{DataPoint, PerformanceMetrics};

use crate::error::AnalyticsError;
use crate::report::MetricSummary;
use crate::stats;
use crate::trend::analyze_trend;

const HOURS_PER_DAY: f64 = 24.0;

/// Summary of utilization across the samples, with its trend.
pub fn average_utilization(metrics: &[PerformanceMetrics]) -> Result<MetricSummary, AnalyticsError> {
    let series = derive_series(metrics, |m| m.utilization)?;
    summarize(&series, "utilization")
}

/// Summary of revenue earned per active hour.
///
/// Each sample is treated as one day: `revenueUsd / (utilization × 24)`, or 0
/// when the node was idle. The trend is fitted on the derived series.
pub fn revenue_per_hour(metrics: &[PerformanceMetrics]) -> Result<MetricSummary, AnalyticsError> {
    let series = derive_series(metrics, |m| {
        if m.utilization > 0.0 {
            m.revenue_usd / (m.utilization * HOURS_PER_DAY)
        } else {
            0.0
        }
    })?;
    summarize(&series, "revenue per hour")
}

/// Validates and time-orders the samples, then maps each to one value.
fn derive_series<F>(
    metrics: &[PerformanceMetrics],
    value: F,
) -> Result<Vec<DataPoint>, AnalyticsError>
where
    F: Fn(&PerformanceMetrics) -> f64,
{
    if metrics.is_empty() {
        return Err(AnalyticsError::NotEnoughData(
            "at least one metrics sample is required".to_string(),
        ));
    }

    let mut sorted: Vec<&PerformanceMetrics> = metrics.iter().collect();
    for m in &sorted {
        m.validate()?;
    }
    sorted.sort_by_key(|m| m.timestamp);

    Ok(sorted
        .into_iter()
        .map(|m| DataPoint::new(m.timestamp, value(m)))
        .collect())
}

pub(crate) fn summarize(series: &[DataPoint], label: &str) -> Result<MetricSummary, AnalyticsError> {
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let (average, (min, max)) = match (stats::mean(&values), stats::min_max(&values)) {
        (Some(average), Some(bounds)) => (average, bounds),
        _ => {
            return Err(AnalyticsError::NotEnoughData(format!(
                "no samples to summarize {label}"
            )));
        }
    };

    let trend = if series.len() >= 2 {
        Some(analyze_trend(series, Some(&trend_period(series)))?)
    } else {
        None
    };

    Ok(MetricSummary {
        average,
        min,
        max,
        std_dev: stats::population_std_dev(&values, average),
        trend,
        sample_count: values.len(),
    })
}

/// "YYYY-MM-DD to YYYY-MM-DD" over a time-ordered series.
fn trend_period(series: &[DataPoint]) -> String {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => format!(
            "{} to {}",
            first.timestamp.format("%Y-%m-%d"),
            last.timestamp.format("%Y-%m-%d")
        ),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::TrendDirection;

    fn day(offset: i64, utilization: f64, revenue_usd: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            utilization,
            revenue_usd,
            uptime: 1.0,
            response_time: None,
            error_rate: None,
            queue_depth: None,
            timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap() + Duration::days(offset),
        }
    }

    #[test]
    fn utilization_summary_sorts_before_trending() {
        let metrics = vec![day(2, 0.9, 0.0), day(0, 0.5, 0.0), day(1, 0.7, 0.0)];
        let summary = average_utilization(&metrics).unwrap();
        assert!((summary.average - 0.7).abs() < 1e-12);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 0.9);
        assert_eq!(summary.sample_count, 3);
        let trend = summary.trend.unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert_eq!(trend.period, "2024-02-01 to 2024-02-03");
    }

    #[test]
    fn idle_samples_earn_zero_per_hour() {
        let metrics = vec![day(0, 0.5, 120.0), day(1, 0.0, 0.0)];
        let summary = revenue_per_hour(&metrics).unwrap();
        assert_eq!(summary.max, 10.0);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.average, 5.0);
    }

    #[test]
    fn single_sample_has_no_trend() {
        let summary = average_utilization(&[day(0, 0.4, 1.0)]).unwrap();
        assert!(summary.trend.is_none());
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            revenue_per_hour(&[]),
            Err(AnalyticsError::NotEnoughData(_))
        ));
    }
}
