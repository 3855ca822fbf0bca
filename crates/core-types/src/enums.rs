use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The direction of a fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// How tightly the samples follow the fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl DemandLevel {
    /// The factor applied to a price adjustment under this demand level.
    pub fn adjustment_factor(&self) -> f64 {
        match self {
            DemandLevel::Low => 0.7,
            DemandLevel::Medium => 1.0,
            DemandLevel::High => 1.3,
        }
    }
}

/// How aggressively the pricing engine reacts to a utilization gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    #[default]
    Conservative,
    MarketBased,
    UtilizationDriven,
    Aggressive,
}

impl PricingStrategy {
    /// Scales the base adjustment produced by the rule ladder.
    pub fn multiplier(&self) -> f64 {
        match self {
            PricingStrategy::Conservative => 0.5,
            PricingStrategy::MarketBased => 1.0,
            PricingStrategy::UtilizationDriven => 1.2,
            PricingStrategy::Aggressive => 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingStrategy::Conservative => "conservative",
            PricingStrategy::MarketBased => "market_based",
            PricingStrategy::UtilizationDriven => "utilization_driven",
            PricingStrategy::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(PricingStrategy::Conservative),
            "market_based" => Ok(PricingStrategy::MarketBased),
            "utilization_driven" => Ok(PricingStrategy::UtilizationDriven),
            "aggressive" => Ok(PricingStrategy::Aggressive),
            other => Err(CoreError::invalid(
                "strategy",
                format!(
                    "'{other}' is not one of conservative, market_based, utilization_driven, aggressive"
                ),
            )),
        }
    }
}
