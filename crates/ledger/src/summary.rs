use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::record::StatementRecord;

/// Totals and averages over a set of statement records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Distinct node ids.
    pub total_nodes: usize,
    pub total_gross_revenue_usd: Decimal,
    pub total_operator_cut_usd: Decimal,
    pub total_owner_cut_usd: Decimal,
    /// Unweighted mean over records.
    pub average_utilization_percent: Decimal,
    /// Unweighted mean over records.
    pub average_uptime: Decimal,
    /// Node with the strictly greatest gross revenue. Absent when no node earned anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_performing_node: Option<String>,
    pub records: Vec<StatementRecord>,
}

/// Aggregates records into a summary.
///
/// A summary over zero records has no period, so an empty input is an error
/// rather than a zeroed summary.
pub fn generate_statement_summary(
    records: &[StatementRecord],
) -> Result<StatementSummary, LedgerError> {
    let (Some(period_start), Some(period_end)) = (
        records.iter().map(|r| r.date).min(),
        records.iter().map(|r| r.date).max(),
    ) else {
        return Err(LedgerError::EmptyStatement);
    };

    let mut total_gross_revenue_usd = Decimal::ZERO;
    let mut total_operator_cut_usd = Decimal::ZERO;
    let mut total_owner_cut_usd = Decimal::ZERO;
    let mut utilization_sum = Decimal::ZERO;
    let mut uptime_sum = Decimal::ZERO;
    let mut gross_by_node: IndexMap<&str, Decimal> = IndexMap::new();

    for record in records {
        total_gross_revenue_usd = checked_add(
            total_gross_revenue_usd,
            record.gross_revenue_usd,
            "totalGrossRevenueUsd",
        )?;
        total_operator_cut_usd = checked_add(
            total_operator_cut_usd,
            record.operator_cut_usd,
            "totalOperatorCutUsd",
        )?;
        total_owner_cut_usd =
            checked_add(total_owner_cut_usd, record.owner_cut_usd, "totalOwnerCutUsd")?;
        utilization_sum = checked_add(
            utilization_sum,
            record.utilization_percent,
            "averageUtilizationPercent",
        )?;
        uptime_sum = checked_add(uptime_sum, record.uptime, "averageUptime")?;

        let node_gross = gross_by_node.entry(record.node_id.as_str()).or_default();
        *node_gross = checked_add(*node_gross, record.gross_revenue_usd, "topPerformingNode")?;
    }

    // Strict comparison: the first node seen keeps the title on a tie.
    let mut top_performing_node = None;
    let mut best = Decimal::ZERO;
    for (node_id, gross) in &gross_by_node {
        if *gross > best {
            best = *gross;
            top_performing_node = Some(node_id.to_string());
        }
    }

    let count = Decimal::from(records.len());
    let summary = StatementSummary {
        period_start,
        period_end,
        total_nodes: gross_by_node.len(),
        total_gross_revenue_usd,
        total_operator_cut_usd,
        total_owner_cut_usd,
        average_utilization_percent: utilization_sum
            .checked_div(count)
            .ok_or(LedgerError::Overflow("averageUtilizationPercent"))?,
        average_uptime: uptime_sum
            .checked_div(count)
            .ok_or(LedgerError::Overflow("averageUptime"))?,
        top_performing_node,
        records: records.to_vec(),
    };

    tracing::debug!(
        records = records.len(),
        nodes = summary.total_nodes,
        gross = %summary.total_gross_revenue_usd,
        "Statement summary generated"
    );

    Ok(summary)
}

fn checked_add(total: Decimal, value: Decimal, field: &'static str) -> Result<Decimal, LedgerError> {
    total.checked_add(value).ok_or(LedgerError::Overflow(field))
}

/// Summary of the records dated within one calendar month.
pub fn generate_monthly_statement(
    records: &[StatementRecord],
    month: u32,
    year: i32,
) -> Result<StatementSummary, LedgerError> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth(month));
    }

    let in_month: Vec<StatementRecord> = records
        .iter()
        .filter(|r| r.date.month() == month && r.date.year() == year)
        .cloned()
        .collect();

    if in_month.is_empty() {
        return Err(LedgerError::NoRecordsForPeriod { month, year });
    }

    generate_statement_summary(&in_month)
}
