use thiserror::Error;

/// Failures while building the merged `Config`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `NODEYIELD_*` variable could not be read or deserialized.
    #[error("Failed to load nodeyield configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// A setting was read but falls outside its allowed range.
    #[error("Invalid nodeyield configuration: {0}")]
    ValidationError(String),
}
