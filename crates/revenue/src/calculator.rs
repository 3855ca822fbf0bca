use core_types::{RevShareResult, validate};
use serde::{Deserialize, Serialize};

use crate::error::RevenueError;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DEFAULT_DAYS_IN_MONTH: u32 = 30;

/// Hours a node must earn to hit a monthly revenue target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUtilization {
    pub total_hours: f64,
    pub required_hours: f64,
    /// `required_hours / total_hours`, capped at 1. A value of exactly 1 means
    /// the target is out of reach at this price.
    pub target_utilization: f64,
}

/// Distance between projected and targeted monthly revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueGap {
    pub target_gross: f64,
    pub current_gross: f64,
    /// Positive when short of the target.
    pub gap: f64,
    pub gap_percentage: f64,
    pub is_target_met: bool,
}

/// Total hours in a month of `days_in_month` days.
fn month_hours(days_in_month: u32) -> Result<f64, RevenueError> {
    let days = validate::in_range("daysInMonth", f64::from(days_in_month), 1.0, 31.0)?;
    Ok(days * HOURS_PER_DAY)
}

/// Splits gross revenue into the operator's cut and the owner's remainder.
///
/// `my_cut = gross × pct` and `owner_cut = gross − my_cut`, so the two always
/// add back up to `gross`.
pub fn compute_rev_share(gross_usd: f64, rev_share_pct: f64) -> Result<RevShareResult, RevenueError> {
    validate::non_negative("grossUsd", gross_usd)?;
    if validate::unit_interval("revSharePct", rev_share_pct).is_err() {
        return Err(RevenueError::Validation(
            "Revenue share percentage must be between 0 and 1".to_string(),
        ));
    }

    let my_cut_usd = gross_usd * rev_share_pct;
    Ok(RevShareResult {
        gross_usd,
        my_cut_usd,
        owner_cut_usd: gross_usd - my_cut_usd,
        rev_share_pct,
    })
}

/// Utilization needed to earn `target_monthly_gross` at `price_per_hour`.
pub fn calculate_target_utilization(
    target_monthly_gross: f64,
    price_per_hour: f64,
    days_in_month: u32,
) -> Result<TargetUtilization, RevenueError> {
    validate::non_negative("targetMonthlyGross", target_monthly_gross)?;
    validate::positive("pricePerHour", price_per_hour)?;
    let total_hours = month_hours(days_in_month)?;

    let required_hours = target_monthly_gross / price_per_hour;
    Ok(TargetUtilization {
        total_hours,
        required_hours,
        target_utilization: (required_hours / total_hours).min(1.0),
    })
}

/// Gross revenue for a month at a steady utilization and price.
pub fn calculate_monthly_gross(
    utilization: f64,
    price_per_hour: f64,
    days_in_month: u32,
) -> Result<f64, RevenueError> {
    validate::unit_interval("utilization", utilization)?;
    validate::non_negative("pricePerHour", price_per_hour)?;
    let total_hours = month_hours(days_in_month)?;

    Ok(total_hours * utilization * price_per_hour)
}

/// Compares the projected monthly gross against a target.
pub fn calculate_revenue_gap(
    target_monthly_gross: f64,
    utilization: f64,
    price_per_hour: f64,
    days_in_month: u32,
) -> Result<RevenueGap, RevenueError> {
    validate::non_negative("targetMonthlyGross", target_monthly_gross)?;
    let current_gross = calculate_monthly_gross(utilization, price_per_hour, days_in_month)?;

    let gap = target_monthly_gross - current_gross;
    let gap_percentage = if target_monthly_gross > 0.0 {
        gap / target_monthly_gross
    } else {
        0.0
    };

    Ok(RevenueGap {
        target_gross: target_monthly_gross,
        current_gross,
        gap,
        gap_percentage,
        is_target_met: gap <= 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_gross_at_eighty_percent() {
        assert_eq!(calculate_monthly_gross(0.8, 10.0, 30).unwrap(), 5760.0);
    }

    #[test]
    fn target_exactly_at_capacity() {
        let result = calculate_target_utilization(3600.0, 5.0, 30).unwrap();
        assert_eq!(result.total_hours, 720.0);
        assert_eq!(result.required_hours, 720.0);
        assert_eq!(result.target_utilization, 1.0);
    }

    #[test]
    fn unreachable_target_is_capped_not_an_error() {
        let result = calculate_target_utilization(10_000.0, 5.0, 30).unwrap();
        assert_eq!(result.required_hours, 2000.0);
        assert_eq!(result.target_utilization, 1.0);
    }

    #[test]
    fn rev_share_extremes() {
        let none = compute_rev_share(250.0, 0.0).unwrap();
        assert_eq!(none.owner_cut_usd, 250.0);
        assert_eq!(none.my_cut_usd, 0.0);

        let all = compute_rev_share(250.0, 1.0).unwrap();
        assert_eq!(all.my_cut_usd, 250.0);
        assert_eq!(all.owner_cut_usd, 0.0);
    }

    #[test]
    fn rev_share_rejects_percentages_above_one() {
        let err = compute_rev_share(100.0, 15.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Revenue share percentage must be between 0 and 1"
        );
    }

    #[test]
    fn revenue_gap_short_of_target() {
        let gap = calculate_revenue_gap(7200.0, 0.8, 10.0, 30).unwrap();
        assert_eq!(gap.current_gross, 5760.0);
        assert_eq!(gap.gap, 1440.0);
        assert_eq!(gap.gap_percentage, 0.2);
        assert!(!gap.is_target_met);
    }

    #[test]
    fn revenue_gap_with_zero_target() {
        let gap = calculate_revenue_gap(0.0, 0.5, 4.0, 30).unwrap();
        assert_eq!(gap.gap_percentage, 0.0);
        assert!(gap.is_target_met);
    }

    #[test]
    fn validation_errors() {
        assert!(calculate_monthly_gross(1.1, 10.0, 30).is_err());
        assert!(calculate_monthly_gross(0.5, -1.0, 30).is_err());
        assert!(calculate_monthly_gross(0.5, 1.0, 0).is_err());
        assert!(calculate_monthly_gross(0.5, 1.0, 32).is_err());
        assert!(calculate_target_utilization(100.0, 0.0, 30).is_err());
        assert!(calculate_target_utilization(-1.0, 1.0, 30).is_err());
        assert!(compute_rev_share(-5.0, 0.1).is_err());
        assert!(compute_rev_share(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn range_errors_name_the_parameter() {
        assert_eq!(
            calculate_monthly_gross(0.5, 1.0, 32).unwrap_err().to_string(),
            "Invalid input for daysInMonth: must be between 1 and 31"
        );
        assert_eq!(
            calculate_monthly_gross(1.1, 10.0, 30).unwrap_err().to_string(),
            "Invalid input for utilization: must be between 0 and 1"
        );
        assert_eq!(
            calculate_target_utilization(100.0, 0.0, 30)
                .unwrap_err()
                .to_string(),
            "Invalid input for pricePerHour: must be positive"
        );
        assert!(matches!(
            compute_rev_share(-5.0, 0.1),
            Err(RevenueError::InvalidInput(_))
        ));
    }
}
