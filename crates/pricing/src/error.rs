use core_types::CoreError;
use revenue::RevenueError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    #[error("Demand elasticity must be negative, got {0}")]
    InvalidElasticity(f64),

    #[error("Revenue projection failed: {0}")]
    Revenue(#[from] RevenueError),
}
