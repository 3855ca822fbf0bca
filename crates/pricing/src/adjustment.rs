use core_types::validate;
use core_types::{
    Confidence, ExpectedImpact, MarketConditions, PricingStrategy, PricingSuggestion, Priority,
};

use crate::error::PricingError;

/// Queue depth at which queue pressure saturates.
const QUEUE_PRESSURE_SATURATION: f64 = 10.0;

/// Utilization points lost per unit of relative price increase.
const UTILIZATION_ELASTICITY_PROXY: f64 = 2.0;

/// The outcome of the rule ladder before strategy and market scaling.
struct RuleOutcome {
    base_percent: f64,
    reason: String,
    confidence: Confidence,
    priority: Priority,
}

/// Recommends a price move that closes the gap between current and target
/// utilization.
///
/// The first matching rule sets the base adjustment, which is then scaled by
/// the strategy multiplier and, when given, by the market conditions:
///
/// | condition                          | base adjustment                 | confidence | priority |
/// |------------------------------------|---------------------------------|------------|----------|
/// | gap > 0.2 and queue > 5            | `+(0.15 + pressure × 0.1)`      | high       | high     |
/// | gap > 0.1                          | `+(0.05 + gap × 0.2)`           | medium     | medium   |
/// | gap < −0.2 and queue = 0           | `−(0.1 + abs(gap) × 0.15)`      | high       | high     |
/// | gap < −0.05                        | `−(0.03 + abs(gap) × 0.1)`      | medium     | medium   |
/// | otherwise                          | 0                               | high       | low      |
///
/// where `gap = current − target` and `pressure = min(queue / 10, 1)`.
pub fn suggest_price_adjustment(
    current_utilization: f64,
    target_utilization: f64,
    current_price: f64,
    queue_depth: u32,
    strategy: PricingStrategy,
    market_conditions: Option<&MarketConditions>,
) -> Result<PricingSuggestion, PricingError> {
    validate::unit_interval("currentUtilization", current_utilization)?;
    validate::unit_interval("targetUtilization", target_utilization)?;
    validate::non_negative("currentPrice", current_price)?;
    if let Some(conditions) = market_conditions {
        conditions.validate()?;
    }

    let gap = current_utilization - target_utilization;
    let rule = apply_rules(gap, queue_depth, current_utilization, target_utilization);

    let mut adjustment_percent = rule.base_percent * strategy.multiplier();
    if let Some(conditions) = market_conditions {
        adjustment_percent = apply_market_conditions(adjustment_percent, conditions);
    }

    let suggested_price = (current_price * (1.0 + adjustment_percent)).max(0.0);
    let utilization_change = -adjustment_percent * UTILIZATION_ELASTICITY_PROXY;

    Ok(PricingSuggestion {
        current_price,
        suggested_price,
        adjustment_percent,
        adjustment_amount: suggested_price - current_price,
        reason: rule.reason,
        confidence: rule.confidence,
        priority: rule.priority,
        expected_impact: ExpectedImpact {
            utilization_change,
            revenue_change: adjustment_percent + utilization_change,
        },
    })
}

fn apply_rules(gap: f64, queue_depth: u32, current: f64, target: f64) -> RuleOutcome {
    let queue_pressure = (queue_depth as f64 / QUEUE_PRESSURE_SATURATION).min(1.0);
    let current_pct = current * 100.0;
    let target_pct = target * 100.0;

    if gap > 0.2 && queue_depth > 5 {
        RuleOutcome {
            base_percent: 0.15 + queue_pressure * 0.1,
            reason: format!(
                "Utilization {current_pct:.1}% is well above the {target_pct:.1}% target with {queue_depth} jobs queued; raise price to capture excess demand"
            ),
            confidence: Confidence::High,
            priority: Priority::High,
        }
    } else if gap > 0.1 {
        RuleOutcome {
            base_percent: 0.05 + gap * 0.2,
            reason: format!(
                "Utilization {current_pct:.1}% is above the {target_pct:.1}% target; a moderate increase should hold demand"
            ),
            confidence: Confidence::Medium,
            priority: Priority::Medium,
        }
    } else if gap < -0.2 && queue_depth == 0 {
        RuleOutcome {
            base_percent: -(0.1 + gap.abs() * 0.15),
            reason: format!(
                "Utilization {current_pct:.1}% is well below the {target_pct:.1}% target with an empty queue; lower price to attract workloads"
            ),
            confidence: Confidence::High,
            priority: Priority::High,
        }
    } else if gap < -0.05 {
        RuleOutcome {
            base_percent: -(0.03 + gap.abs() * 0.1),
            reason: format!(
                "Utilization {current_pct:.1}% is below the {target_pct:.1}% target; a small decrease should lift demand"
            ),
            confidence: Confidence::Medium,
            priority: Priority::Medium,
        }
    } else {
        RuleOutcome {
            base_percent: 0.0,
            reason: format!(
                "Utilization {current_pct:.1}% is near the {target_pct:.1}% target; keep the current price"
            ),
            confidence: Confidence::High,
            priority: Priority::Low,
        }
    }
}

/// Demand and seasonality scale the adjustment; congestion is added on top.
fn apply_market_conditions(adjustment_percent: f64, conditions: &MarketConditions) -> f64 {
    let mut adjusted = adjustment_percent * conditions.demand_level.adjustment_factor();
    if let Some(seasonality) = conditions.seasonality {
        adjusted *= 0.8 + seasonality * 0.4;
    }
    if let Some(congestion) = conditions.network_congestion {
        adjusted += congestion * 0.05;
    }
    adjusted
}

/// Price that moves utilization to `target_utilization` under a constant
/// demand elasticity.
///
/// Solves `price_change = (target / current − 1) / elasticity` and returns
/// `current_price × (1 + price_change)`, floored at zero.
pub fn calculate_optimal_price(
    current_price: f64,
    current_utilization: f64,
    demand_elasticity: f64,
    target_utilization: f64,
) -> Result<f64, PricingError> {
    validate::non_negative("currentPrice", current_price)?;
    validate::positive("currentUtilization", current_utilization)?;
    validate::positive("targetUtilization", target_utilization)?;
    validate::finite("demandElasticity", demand_elasticity)?;
    if demand_elasticity >= 0.0 {
        return Err(PricingError::InvalidElasticity(demand_elasticity));
    }

    let quantity_change = target_utilization / current_utilization - 1.0;
    let price_change_percent = quantity_change / demand_elasticity;
    Ok((current_price * (1.0 + price_change_percent)).max(0.0))
}
