use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevenueError {
    /// The revenue share fell outside `[0, 1]`.
    #[error("{0}")]
    Validation(String),

    /// An argument fell outside its domain. The message names the parameter.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),
}
