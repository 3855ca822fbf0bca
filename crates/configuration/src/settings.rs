use core_types::PricingStrategy;
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty or missing file is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub analytics: AnalyticsSettings,
    pub pricing: PricingSettings,
    pub scoring: ScoringWeights,
    pub statement: StatementSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()?;
        self.pricing.validate()?;
        self.scoring.validate()?;
        self.statement.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// A `tracing_subscriber::EnvFilter` directive, e.g. "info" or "ledger=debug".
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Defaults for the time-series commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub rolling_window: usize,
    pub ewma_alpha: f64,
    /// Number of standard deviations from the mean beyond which a sample is an anomaly.
    pub anomaly_std_dev_threshold: f64,
}

impl AnalyticsSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rolling_window == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.rolling_window must be positive".to_string(),
            ));
        }
        if !(self.ewma_alpha > 0.0 && self.ewma_alpha <= 1.0) {
            return Err(ConfigError::ValidationError(
                "analytics.ewma_alpha must be in (0, 1]".to_string(),
            ));
        }
        if !(self.anomaly_std_dev_threshold >= 0.0) {
            return Err(ConfigError::ValidationError(
                "analytics.anomaly_std_dev_threshold must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            rolling_window: 7,
            ewma_alpha: 0.3,
            anomaly_std_dev_threshold: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Strategy used when a caller does not name one.
    pub default_strategy: PricingStrategy,
    /// Month length used for monthly revenue projections.
    pub days_in_month: u32,
}

impl PricingSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=31).contains(&self.days_in_month) {
            return Err(ConfigError::ValidationError(
                "pricing.days_in_month must be between 1 and 31".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_strategy: PricingStrategy::Conservative,
            days_in_month: 30,
        }
    }
}

/// Weights for the composite performance score.
///
/// Only the weights whose metric is present in a sample take part in that
/// sample's score, so they need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub utilization: f64,
    pub uptime: f64,
    pub response_time: f64,
    pub error_rate: f64,
}

impl ScoringWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            self.utilization,
            self.uptime,
            self.response_time,
            self.error_rate,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::ValidationError(
                "scoring weights must be non-negative".to_string(),
            ));
        }
        if self.utilization + self.uptime <= 0.0 {
            return Err(ConfigError::ValidationError(
                "scoring.utilization and scoring.uptime cannot both be zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            utilization: 0.4,
            uptime: 0.3,
            response_time: 0.2,
            error_rate: 0.1,
        }
    }
}

/// Formatting of exported statement ledgers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatementSettings {
    pub include_header: bool,
    /// A `chrono` strftime pattern.
    pub date_format: String,
    /// Must be exactly one character.
    pub delimiter: String,
    pub decimal_places: u32,
    pub currency: String,
}

impl StatementSettings {
    /// The delimiter as a single character. Only meaningful after validation.
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '"' && c != '\n' && c != '\r' => {}
            _ => {
                return Err(ConfigError::ValidationError(
                    "statement.delimiter must be a single character other than a quote or newline"
                        .to_string(),
                ));
            }
        }
        if self.decimal_places > 10 {
            return Err(ConfigError::ValidationError(
                "statement.decimal_places must be at most 10".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "statement.date_format cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StatementSettings {
    fn default() -> Self {
        Self {
            include_header: true,
            date_format: "%Y-%m-%d".to_string(),
            delimiter: ",".to_string(),
            decimal_places: 2,
            currency: "USD".to_string(),
        }
    }
}
