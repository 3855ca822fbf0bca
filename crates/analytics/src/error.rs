use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error(transparent)]
    InvalidInput(#[from] CoreError),
}
