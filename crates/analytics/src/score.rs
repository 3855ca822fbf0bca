use configuration::ScoringWeights;
use core_types::PerformanceMetrics;

use crate::error::AnalyticsError;

/// Utilization above this level earns points at a reduced rate.
const UTILIZATION_KNEE: f64 = 0.8;

/// Composite 0-100 health score for a single metrics sample.
///
/// Sub-scores:
/// - utilization: `u × 100` up to 0.8, then `80 + (u − 0.8) × 50`
/// - uptime: `uptime × 100`
/// - response time (if present): `max(0, 100 − ms / 10)`
/// - error rate (if present): `(1 − rate) × 100`
///
/// The result is the weighted mean of the sub-scores that are present,
/// normalized by the sum of the weights actually applied. Every sub-score is
/// already within `[0, 100]`, so the result is too.
pub fn performance_score(
    metrics: &PerformanceMetrics,
    weights: &ScoringWeights,
) -> Result<f64, AnalyticsError> {
    metrics.validate()?;

    let utilization_score = if metrics.utilization <= UTILIZATION_KNEE {
        metrics.utilization * 100.0
    } else {
        80.0 + (metrics.utilization - UTILIZATION_KNEE) * 50.0
    };

    let mut weighted_sum =
        utilization_score * weights.utilization + metrics.uptime * 100.0 * weights.uptime;
    let mut weight_total = weights.utilization + weights.uptime;

    if let Some(response_time) = metrics.response_time {
        weighted_sum += (100.0 - response_time / 10.0).max(0.0) * weights.response_time;
        weight_total += weights.response_time;
    }
    if let Some(error_rate) = metrics.error_rate {
        weighted_sum += (1.0 - error_rate) * 100.0 * weights.error_rate;
        weight_total += weights.error_rate;
    }

    if weight_total <= 0.0 {
        return Err(AnalyticsError::InvalidArgument(
            "Score weights for the present metrics sum to zero".to_string(),
        ));
    }

    Ok(weighted_sum / weight_total)
}
