//! # Nodeyield Revenue
//!
//! Closed-form formulas relating a node's hourly price, its utilization, and
//! the split of gross revenue between the platform operator and the owner.
//!
//! All functions are pure and reject out-of-domain arguments with a
//! a `RevenueError` naming the offending parameter. Money is plain
//! `f64` here; no rounding is applied.

pub mod calculator;
pub mod error;

pub use calculator::{
    DEFAULT_DAYS_IN_MONTH, HOURS_PER_DAY, RevenueGap, TargetUtilization,
    calculate_monthly_gross, calculate_revenue_gap, calculate_target_utilization,
    compute_rev_share,
};
pub use error::RevenueError;
