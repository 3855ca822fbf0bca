use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Decimal places kept on a derived utilization percentage.
const UTILIZATION_PERCENT_DP: u32 = 4;

/// One node's figures for one billing period.
///
/// Records are produced once per node and period and never mutated; a
/// correction means building a new record.
///
/// `utilization_hours <= total_hours` and `utilization_percent` matching
/// `utilization_hours / total_hours` are not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRecord {
    pub date: NaiveDate,
    pub node_id: String,
    pub node_name: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub utilization_hours: Decimal,
    pub total_hours: Decimal,
    pub utilization_percent: Decimal,
    pub price_per_hour: Decimal,
    pub gross_revenue_usd: Decimal,
    /// Operator share of gross revenue, in percent (0-100).
    pub rev_share_percent: Decimal,
    pub operator_cut_usd: Decimal,
    pub owner_cut_usd: Decimal,
    /// Percent of the period the node was reachable (0-100).
    pub uptime: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Raw usage for one node-period, from which a record's money columns are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUsage {
    pub date: NaiveDate,
    pub node_id: String,
    pub node_name: String,
    pub node_type: String,
    pub region: Option<String>,
    pub utilization_hours: Decimal,
    pub total_hours: Decimal,
    pub price_per_hour: Decimal,
    pub rev_share_percent: Decimal,
    pub uptime: Decimal,
    pub notes: Option<String>,
}

impl StatementRecord {
    /// Builds a record from usage, deriving utilization, gross revenue and the cuts.
    ///
    /// `gross = utilization_hours × price_per_hour`; the operator keeps
    /// `gross × rev_share_percent / 100` and the owner receives the rest, so
    /// the two cuts always sum to gross.
    ///
    /// Amounts whose product or quotient leaves the range of `Decimal` yield
    /// `LedgerError::Overflow` naming the derived column.
    pub fn from_usage(usage: NodeUsage) -> Result<Self, LedgerError> {
        let utilization_percent = if usage.total_hours > Decimal::ZERO {
            usage
                .utilization_hours
                .checked_div(usage.total_hours)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .ok_or(LedgerError::Overflow("utilizationPercent"))?
                .round_dp(UTILIZATION_PERCENT_DP)
        } else {
            Decimal::ZERO
        };
        let gross_revenue_usd = usage
            .utilization_hours
            .checked_mul(usage.price_per_hour)
            .ok_or(LedgerError::Overflow("grossRevenueUsd"))?;
        let operator_cut_usd = gross_revenue_usd
            .checked_mul(usage.rev_share_percent / dec!(100))
            .ok_or(LedgerError::Overflow("operatorCutUsd"))?;
        let owner_cut_usd = gross_revenue_usd
            .checked_sub(operator_cut_usd)
            .ok_or(LedgerError::Overflow("ownerCutUsd"))?;

        let record = Self {
            date: usage.date,
            node_id: usage.node_id,
            node_name: usage.node_name,
            node_type: usage.node_type,
            region: usage.region,
            utilization_hours: usage.utilization_hours,
            total_hours: usage.total_hours,
            utilization_percent,
            price_per_hour: usage.price_per_hour,
            gross_revenue_usd,
            rev_share_percent: usage.rev_share_percent,
            operator_cut_usd,
            owner_cut_usd,
            uptime: usage.uptime,
            notes: usage.notes,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<(), LedgerError> {
        require_text("nodeId", &self.node_id)?;
        require_text("nodeName", &self.node_name)?;
        require_text("nodeType", &self.node_type)?;

        for (field, value) in [
            ("utilizationHours", self.utilization_hours),
            ("totalHours", self.total_hours),
            ("utilizationPercent", self.utilization_percent),
            ("pricePerHour", self.price_per_hour),
            ("grossRevenueUsd", self.gross_revenue_usd),
            ("operatorCutUsd", self.operator_cut_usd),
            ("ownerCutUsd", self.owner_cut_usd),
        ] {
            if value < Decimal::ZERO {
                return Err(LedgerError::Validation(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }

        require_percent("revSharePercent", self.rev_share_percent)?;
        require_percent("uptime", self.uptime)?;
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_percent(field: &str, value: Decimal) -> Result<(), LedgerError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(LedgerError::Validation(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}
