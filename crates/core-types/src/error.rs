use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

impl CoreError {
    /// Shorthand for an `InvalidInput` naming the parameter and its required domain.
    pub fn invalid(field: &str, requirement: impl Into<String>) -> Self {
        CoreError::InvalidInput(field.to_string(), requirement.into())
    }
}
