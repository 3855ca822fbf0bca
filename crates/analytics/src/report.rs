use core_types::TrendAnalysis;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of one derived metric over a set of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Absent when fewer than two samples were available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendAnalysis>,
    pub sample_count: usize,
}

/// A node's performance over a window of metrics samples.
///
/// This struct is the output of the `AnalyticsEngine` and is what the route
/// layer serializes for the node detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub utilization: MetricSummary,
    pub revenue_per_hour: MetricSummary,
    pub performance_score: MetricSummary,
    /// Score of the most recent sample.
    pub latest_score: f64,
}
