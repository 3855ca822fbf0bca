use core_types::{PricingStrategy, PricingSuggestion, validate};
use revenue::{RevenueGap, calculate_monthly_gross, calculate_revenue_gap};
use serde::{Deserialize, Serialize};

use crate::adjustment::suggest_price_adjustment;
use crate::error::PricingError;

/// Percentage of the current queue assumed to remain at the short-term horizon.
const SHORT_TERM_QUEUE_RETENTION_PCT: u64 = 70;

/// Long-term utilization is assumed to settle just under target.
const LONG_TERM_UTILIZATION_FACTOR: f64 = 0.9;

/// Where a node stands today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMetrics {
    pub utilization: f64,
    pub price: f64,
    #[serde(default)]
    pub queue_depth: u32,
}

/// Where the owner wants the node to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTargets {
    pub target_utilization: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_monthly_gross: Option<f64>,
}

/// Three chained recommendations; each stage starts from the previous
/// stage's suggested price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRoadmap {
    pub immediate: PricingSuggestion,
    pub short_term: PricingSuggestion,
    pub long_term: PricingSuggestion,
    /// Monthly gross at the long-term price if the target utilization is reached.
    pub projected_monthly_gross: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_gap: Option<RevenueGap>,
}

/// Builds the immediate → short-term → long-term pricing pipeline.
///
/// 1. Immediate: aggressive, current utilization and full queue.
/// 2. Short-term: conservative, queue reduced to 70% (rounded down), starting
///    from the immediate price.
/// 3. Long-term: market based, utilization assumed at 90% of target with an
///    empty queue, starting from the short-term price.
pub fn generate_pricing_roadmap(
    current: &CurrentMetrics,
    targets: &PricingTargets,
    days_in_month: u32,
) -> Result<PricingRoadmap, PricingError> {
    validate::unit_interval("targetUtilization", targets.target_utilization)?;

    let immediate = suggest_price_adjustment(
        current.utilization,
        targets.target_utilization,
        current.price,
        current.queue_depth,
        PricingStrategy::Aggressive,
        None,
    )?;

    let short_term_queue =
        (u64::from(current.queue_depth) * SHORT_TERM_QUEUE_RETENTION_PCT / 100) as u32;
    let short_term = suggest_price_adjustment(
        current.utilization,
        targets.target_utilization,
        immediate.suggested_price,
        short_term_queue,
        PricingStrategy::Conservative,
        None,
    )?;

    let long_term = suggest_price_adjustment(
        targets.target_utilization * LONG_TERM_UTILIZATION_FACTOR,
        targets.target_utilization,
        short_term.suggested_price,
        0,
        PricingStrategy::MarketBased,
        None,
    )?;

    let projected_monthly_gross = calculate_monthly_gross(
        targets.target_utilization,
        long_term.suggested_price,
        days_in_month,
    )?;

    let revenue_gap = targets
        .target_monthly_gross
        .map(|target| {
            calculate_revenue_gap(
                target,
                targets.target_utilization,
                long_term.suggested_price,
                days_in_month,
            )
        })
        .transpose()?;

    Ok(PricingRoadmap {
        immediate,
        short_term,
        long_term,
        projected_monthly_gross,
        revenue_gap,
    })
}
