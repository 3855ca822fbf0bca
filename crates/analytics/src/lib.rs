//! # Nodeyield Analytics
//!
//! Time-series statistics for node metrics: smoothing, trend fitting, outlier
//! detection, and the composite performance score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** Every function takes its samples by reference and returns
//!   fresh values. Identical inputs always produce identical outputs.
//!
//! ## Public API
//!
//! - `rolling_average`, `ewma`: smoothing of `DataPoint` series.
//! - `analyze_trend`: least-squares trend with direction, strength and confidence.
//! - `detect_anomalies`: population z-score outliers.
//! - `performance_score`: weighted 0-100 health score of one sample.
//! - `average_utilization`, `revenue_per_hour`: `MetricSummary` aggregates.
//! - `AnalyticsEngine`: bundles the above into a `PerformanceReport`.

pub mod aggregates;
pub mod anomaly;
pub mod engine;
pub mod error;
pub mod report;
pub mod score;
pub mod smoothing;
mod stats;
pub mod trend;

pub use aggregates::{average_utilization, revenue_per_hour};
pub use anomaly::{DEFAULT_STD_DEV_THRESHOLD, detect_anomalies};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{MetricSummary, PerformanceReport};
pub use score::performance_score;
pub use smoothing::{ewma, rolling_average, rolling_average_with_min};
pub use trend::analyze_trend;
