//! # Nodeyield Core Types
//!
//! The shared vocabulary of the analytics engine: time-series samples, node
//! performance snapshots, and the result objects handed back to callers.
//!
//! As a Layer 0 crate it has no workspace dependencies. Every type here is a
//! plain value object; the calculation crates consume and produce them.

pub mod enums;
pub mod error;
pub mod structs;
pub mod validate;

// Re-export the core types to provide a clean public API.
pub use enums::{
    Confidence, DemandLevel, PricingStrategy, Priority, TrendDirection, TrendStrength,
};
pub use error::CoreError;
pub use structs::{
    DataPoint, ExpectedImpact, MarketConditions, PerformanceMetrics, PricingSuggestion,
    RevShareResult, TimeSeries, TrendAnalysis,
};
