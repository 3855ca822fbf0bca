use core_types::{DataPoint, TrendAnalysis, TrendDirection, TrendStrength};

use crate::error::AnalyticsError;
use crate::stats;

/// Slopes smaller than this (per millisecond) count as flat.
pub const STABLE_SLOPE_EPSILON: f64 = 1e-10;

/// Fits an ordinary least-squares line through the series.
///
/// The independent variable is the timestamp in epoch milliseconds, so the
/// returned `slope` is the change in value per millisecond. Requires at least
/// two points.
///
/// Strength is bucketed on `|correlation|` (`< 0.3` weak, `< 0.7` moderate,
/// otherwise strong) and `confidence = min(r² · log10(n) · 0.3, 1)`.
pub fn analyze_trend(
    data: &[DataPoint],
    period_label: Option<&str>,
) -> Result<TrendAnalysis, AnalyticsError> {
    let n = data.len();
    if n < 2 {
        return Err(AnalyticsError::NotEnoughData(format!(
            "trend analysis requires at least 2 data points, got {n}"
        )));
    }

    let xs: Vec<f64> = data
        .iter()
        .map(|p| p.timestamp.timestamp_millis() as f64)
        .collect();
    let ys: Vec<f64> = data.iter().map(|p| p.value).collect();

    let (slope, correlation) = least_squares(&xs, &ys);

    let direction = if slope.abs() < STABLE_SLOPE_EPSILON {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let strength = match correlation.abs() {
        r if r < 0.3 => TrendStrength::Weak,
        r if r < 0.7 => TrendStrength::Moderate,
        _ => TrendStrength::Strong,
    };

    let confidence = (correlation.powi(2) * (n as f64).log10() * 0.3).min(1.0);

    let period = period_label
        .map(str::to_string)
        .unwrap_or_else(|| format!("{n} data points"));

    tracing::debug!(
        n,
        slope,
        correlation,
        ?direction,
        ?strength,
        "Trend fitted"
    );

    Ok(TrendAnalysis {
        direction,
        strength,
        slope,
        correlation,
        confidence,
        period,
    })
}

/// Returns `(slope, pearson_correlation)`.
///
/// Sums are taken over deviations from the means; epoch milliseconds squared
/// would otherwise exhaust the mantissa. Degenerate inputs (all `x` equal or
/// all `y` equal) yield a correlation of 0.
fn least_squares(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let (Some(mean_x), Some(mean_y)) = (stats::mean(xs), stats::mean(ys)) else {
        return (0.0, 0.0);
    };

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let denominator = (sxx * syy).sqrt();
    let correlation = if denominator > 0.0 {
        (sxy / denominator).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    (slope, correlation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn daily(values: &[f64]) -> Vec<DataPoint> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(start + Duration::days(i as i64), *v))
            .collect()
    }

    #[test]
    fn perfectly_linear_increase_is_strong() {
        let trend = analyze_trend(&daily(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some("week")).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert_eq!(trend.strength, TrendStrength::Strong);
        assert!((trend.correlation - 1.0).abs() < 1e-12);
        // One unit per day, expressed per millisecond.
        assert!((trend.slope - 1.0 / 86_400_000.0).abs() < 1e-18);
        assert!((trend.confidence - 5f64.log10() * 0.3).abs() < 1e-12);
        assert_eq!(trend.period, "week");
    }

    #[test]
    fn decreasing_series() {
        let trend = analyze_trend(&daily(&[10.0, 8.0, 6.5, 4.0]), None).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!(trend.correlation < -0.9);
        assert_eq!(trend.period, "4 data points");
    }

    #[test]
    fn constant_series_is_stable_and_weak() {
        let trend = analyze_trend(&daily(&[3.0, 3.0, 3.0]), None).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.strength, TrendStrength::Weak);
        assert_eq!(trend.correlation, 0.0);
        assert_eq!(trend.confidence, 0.0);
    }

    #[test]
    fn confidence_is_capped_at_one() {
        let values: Vec<f64> = (0..100_000).map(|i| i as f64).collect();
        let trend = analyze_trend(&daily(&values), None).unwrap();
        assert!(trend.confidence <= 1.0);
        assert_eq!(trend.confidence, 1.0);
    }

    #[test]
    fn single_point_is_an_error() {
        let err = analyze_trend(&daily(&[1.0]), None).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotEnoughData(_)));
    }
}
