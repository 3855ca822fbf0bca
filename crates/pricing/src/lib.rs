//! # Nodeyield Pricing
//!
//! Rule- and elasticity-based price recommendations for nodes, driven by the
//! gap between current and target utilization and by queued demand.
//!
//! - `suggest_price_adjustment`: one recommendation from the rule ladder.
//! - `calculate_optimal_price`: closed-form price under constant elasticity.
//! - `generate_pricing_roadmap`: immediate, short-term and long-term stages,
//!   each starting from the previous stage's price.
//! - `PricingEngine`: the same, with configured defaults and logging.

pub mod adjustment;
pub mod engine;
pub mod error;
pub mod roadmap;

pub use adjustment::{calculate_optimal_price, suggest_price_adjustment};
pub use engine::PricingEngine;
pub use error::PricingError;
pub use roadmap::{CurrentMetrics, PricingRoadmap, PricingTargets, generate_pricing_roadmap};
