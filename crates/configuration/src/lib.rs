use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Logging, PricingSettings, ScoringWeights, StatementSettings};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "nodeyield.toml";

/// Prefix of the environment variables that override file settings,
/// e.g. `NODEYIELD_PRICING__DEFAULT_STRATEGY=aggressive`.
pub const ENV_PREFIX: &str = "NODEYIELD";

/// Loads the application configuration.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file at `path`
/// (optional; a missing file is not an error), then `NODEYIELD_*` environment
/// variables. The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let builder = config::Config::builder()
        .add_source(config::File::from(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(file = %file.display(), "Configuration loaded");
    Ok(config)
}
