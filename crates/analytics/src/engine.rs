use configuration::ScoringWeights;
use core_types::{DataPoint, PerformanceMetrics};

use crate::aggregates::{self, summarize};
use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use crate::score::performance_score;

/// A stateless calculator for deriving performance figures from metrics samples.
///
/// The only configuration it carries is the set of score weights.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    weights: ScoringWeights,
}

impl AnalyticsEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Scores a single sample with the configured weights.
    pub fn score(&self, metrics: &PerformanceMetrics) -> Result<f64, AnalyticsError> {
        performance_score(metrics, &self.weights)
    }

    /// Scores every sample, returning a time-ordered score series.
    pub fn score_series(
        &self,
        metrics: &[PerformanceMetrics],
    ) -> Result<Vec<DataPoint>, AnalyticsError> {
        if metrics.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "at least one metrics sample is required".to_string(),
            ));
        }

        let mut sorted: Vec<&PerformanceMetrics> = metrics.iter().collect();
        sorted.sort_by_key(|m| m.timestamp);
        sorted
            .into_iter()
            .map(|m| Ok(DataPoint::new(m.timestamp, self.score(m)?)))
            .collect()
    }

    /// The main entry point for summarizing a node's metrics window.
    ///
    /// # Arguments
    ///
    /// * `metrics` - The samples for one node, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PerformanceReport` or an `AnalyticsError`
    /// when the window is empty or a sample is out of range.
    pub fn calculate(
        &self,
        metrics: &[PerformanceMetrics],
    ) -> Result<PerformanceReport, AnalyticsError> {
        let utilization = aggregates::average_utilization(metrics)?;
        let revenue_per_hour = aggregates::revenue_per_hour(metrics)?;

        let scores = self.score_series(metrics)?;
        let performance_score = summarize(&scores, "performance score")?;
        let latest_score = scores.last().map(|p| p.value).unwrap_or_default();

        tracing::debug!(
            samples = metrics.len(),
            average_utilization = utilization.average,
            latest_score,
            "Performance report calculated"
        );

        Ok(PerformanceReport {
            utilization,
            revenue_per_hour,
            performance_score,
            latest_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn day(offset: i64, utilization: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            utilization,
            revenue_usd: utilization * 24.0 * 2.0,
            uptime: 1.0,
            response_time: Some(100.0),
            error_rate: Some(0.0),
            queue_depth: Some(0),
            timestamp: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap() + Duration::days(offset),
        }
    }

    #[test]
    fn report_covers_all_samples() {
        let engine = AnalyticsEngine::default();
        let metrics = vec![day(1, 0.6), day(0, 0.4), day(2, 0.8)];
        let report = engine.calculate(&metrics).unwrap();

        assert_eq!(report.utilization.sample_count, 3);
        // Revenue was built as $2 per active hour on every day.
        assert!((report.revenue_per_hour.average - 2.0).abs() < 1e-12);
        assert!((report.revenue_per_hour.std_dev).abs() < 1e-12);
        // Latest is the 0.8 day: (80*.4 + 100*.3 + 90*.2 + 100*.1) / 1.0
        assert!((report.latest_score - 90.0).abs() < 1e-9);
        assert!(report.performance_score.min < report.performance_score.max);
    }

    #[test]
    fn score_series_is_time_ordered() {
        let engine = AnalyticsEngine::default();
        let series = engine.score_series(&[day(1, 0.8), day(0, 0.1)]).unwrap();
        assert!(series[0].timestamp < series[1].timestamp);
        assert!(series[0].value < series[1].value);
    }

    #[test]
    fn empty_window_is_an_error() {
        assert!(AnalyticsEngine::default().calculate(&[]).is_err());
    }
}
