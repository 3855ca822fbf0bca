use configuration::PricingSettings;
use core_types::{MarketConditions, PricingStrategy, PricingSuggestion};

use crate::adjustment::suggest_price_adjustment;
use crate::error::PricingError;
use crate::roadmap::{CurrentMetrics, PricingRoadmap, PricingTargets, generate_pricing_roadmap};

/// Applies the configured pricing defaults to the stateless pricing functions.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    settings: PricingSettings,
}

impl PricingEngine {
    pub fn new(settings: PricingSettings) -> Self {
        Self { settings }
    }

    /// Recommends a price for one node. `strategy` falls back to the configured default.
    pub fn suggest(
        &self,
        current: &CurrentMetrics,
        target_utilization: f64,
        strategy: Option<PricingStrategy>,
        market_conditions: Option<&MarketConditions>,
    ) -> Result<PricingSuggestion, PricingError> {
        let strategy = strategy.unwrap_or(self.settings.default_strategy);
        let suggestion = suggest_price_adjustment(
            current.utilization,
            target_utilization,
            current.price,
            current.queue_depth,
            strategy,
            market_conditions,
        )?;

        tracing::debug!(
            %strategy,
            utilization = current.utilization,
            target_utilization,
            queue_depth = current.queue_depth,
            adjustment_percent = suggestion.adjustment_percent,
            suggested_price = suggestion.suggested_price,
            "Price adjustment suggested"
        );

        Ok(suggestion)
    }

    /// Builds a three-horizon roadmap using the configured month length.
    pub fn roadmap(
        &self,
        current: &CurrentMetrics,
        targets: &PricingTargets,
    ) -> Result<PricingRoadmap, PricingError> {
        let roadmap = generate_pricing_roadmap(current, targets, self.settings.days_in_month)?;

        tracing::debug!(
            immediate = roadmap.immediate.suggested_price,
            short_term = roadmap.short_term.suggested_price,
            long_term = roadmap.long_term.suggested_price,
            projected_monthly_gross = roadmap.projected_monthly_gross,
            "Pricing roadmap generated"
        );

        Ok(roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_configured_strategy() {
        let engine = PricingEngine::new(PricingSettings {
            default_strategy: PricingStrategy::Aggressive,
            days_in_month: 30,
        });
        let current = CurrentMetrics {
            utilization: 0.3,
            price: 10.0,
            queue_depth: 0,
        };

        let implicit = engine.suggest(&current, 0.7, None, None).unwrap();
        let explicit = engine
            .suggest(&current, 0.7, Some(PricingStrategy::Conservative), None)
            .unwrap();

        assert!((implicit.adjustment_percent + 0.24).abs() < 1e-12);
        assert!((explicit.adjustment_percent + 0.08).abs() < 1e-12);
    }
}
