use std::fmt::Write as _;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LedgerError;
use crate::options::{CsvOptions, check_delimiter};
use crate::record::StatementRecord;
use crate::summary::StatementSummary;

/// Number of ledger columns.
pub const COLUMN_COUNT: usize = 15;

/// Header cells in wire order. `{CUR}` is replaced with the configured currency.
const HEADER: [&str; COLUMN_COUNT] = [
    "Date",
    "Node ID",
    "Node Name",
    "Node Type",
    "Region",
    "Utilization Hours",
    "Total Hours",
    "Utilization %",
    "Price per Hour ({CUR})",
    "Gross Revenue ({CUR})",
    "Rev Share %",
    "Operator Cut ({CUR})",
    "Owner Cut ({CUR})",
    "Uptime %",
    "Notes",
];

/// Renders records as ledger text.
///
/// Lines are joined with `\n` and there is no trailing newline. An empty
/// slice with a header yields exactly the header line.
pub fn records_to_csv(
    records: &[StatementRecord],
    options: &CsvOptions,
) -> Result<String, LedgerError> {
    check_delimiter(options.delimiter)?;

    let mut lines = Vec::with_capacity(records.len() + 1);
    if options.include_header {
        lines.push(header_line(options));
    }
    for record in records {
        lines.push(record_line(record, options)?);
    }
    Ok(lines.join("\n"))
}

/// Renders a summary preamble, a blank line, then the summary's records.
pub fn export_statement_summary_to_csv(
    summary: &StatementSummary,
    options: &CsvOptions,
) -> Result<String, LedgerError> {
    let records = records_to_csv(&summary.records, options)?;

    let currency = &options.currency;
    let dp = options.decimal_places;
    let period = format!(
        "{} to {}",
        format_date(summary.period_start, &options.date_format)?,
        format_date(summary.period_end, &options.date_format)?
    );

    let mut rows = vec![
        ("Statement Period".to_string(), period),
        ("Total Nodes".to_string(), summary.total_nodes.to_string()),
        (
            format!("Total Gross Revenue ({currency})"),
            format_decimal(summary.total_gross_revenue_usd, dp),
        ),
        (
            format!("Total Operator Cut ({currency})"),
            format_decimal(summary.total_operator_cut_usd, dp),
        ),
        (
            format!("Total Owner Cut ({currency})"),
            format_decimal(summary.total_owner_cut_usd, dp),
        ),
        (
            "Average Utilization %".to_string(),
            format_decimal(summary.average_utilization_percent, dp),
        ),
        (
            "Average Uptime %".to_string(),
            format_decimal(summary.average_uptime, dp),
        ),
    ];
    if let Some(node) = &summary.top_performing_node {
        rows.push(("Top Performing Node".to_string(), node.clone()));
    }

    let delimiter = options.delimiter;
    let preamble: Vec<String> = rows
        .iter()
        .map(|(key, value)| {
            format!(
                "{}{delimiter}{}",
                escape_field(key, delimiter),
                escape_field(value, delimiter)
            )
        })
        .collect();

    Ok(format!("{}\n\n{records}", preamble.join("\n")))
}

fn header_line(options: &CsvOptions) -> String {
    let cells: Vec<String> = HEADER
        .iter()
        .map(|cell| escape_field(&cell.replace("{CUR}", &options.currency), options.delimiter))
        .collect();
    cells.join(&options.delimiter.to_string())
}

fn record_line(record: &StatementRecord, options: &CsvOptions) -> Result<String, LedgerError> {
    let dp = options.decimal_places;
    let cells = [
        format_date(record.date, &options.date_format)?,
        record.node_id.clone(),
        record.node_name.clone(),
        record.node_type.clone(),
        record.region.clone().unwrap_or_default(),
        format_decimal(record.utilization_hours, dp),
        format_decimal(record.total_hours, dp),
        format_decimal(record.utilization_percent, dp),
        format_decimal(record.price_per_hour, dp),
        format_decimal(record.gross_revenue_usd, dp),
        format_decimal(record.rev_share_percent, dp),
        format_decimal(record.operator_cut_usd, dp),
        format_decimal(record.owner_cut_usd, dp),
        format_decimal(record.uptime, dp),
        record.notes.clone().unwrap_or_default(),
    ];

    let escaped: Vec<String> = cells
        .iter()
        .map(|cell| escape_field(cell, options.delimiter))
        .collect();
    Ok(escaped.join(&options.delimiter.to_string()))
}

/// Quotes a field, doubling inner quotes, iff it contains the delimiter, a
/// quote or a line break.
pub fn escape_field(value: &str, delimiter: char) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Exactly `decimal_places` fractional digits, midpoints rounded away from zero.
pub fn format_decimal(value: Decimal, decimal_places: u32) -> String {
    let rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimal_places as usize, rounded)
}

fn format_date(date: NaiveDate, date_format: &str) -> Result<String, LedgerError> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format))
        .map_err(|_| LedgerError::InvalidDateFormat(date_format.to_string()))?;
    Ok(out)
}
