use std::iter::Peekable;
use std::str::{Chars, FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::options::{ParseOptions, check_delimiter};
use crate::record::StatementRecord;

/// Rows shorter than this are incomplete and dropped without a warning.
pub const MIN_FIELDS_PER_ROW: usize = 13;

/// A data row that was dropped because it did not produce a valid record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWarning {
    /// 1-based line on which the row starts.
    pub line: usize,
    pub message: String,
}

/// Records recovered from ledger text, plus a warning for every row that was
/// skipped as invalid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLedger {
    pub records: Vec<StatementRecord>,
    pub warnings: Vec<RowWarning>,
}

/// Reads ledger text back into records.
///
/// Bad rows never abort the parse: rows with fewer than 13 fields are
/// skipped silently, and rows that fail to parse or validate are skipped
/// with a warning. Only an unusable delimiter is an error.
pub fn parse_csv_to_records(
    csv: &str,
    options: &ParseOptions,
) -> Result<ParsedLedger, LedgerError> {
    check_delimiter(options.delimiter)?;

    let mut rows = tokenize(csv, options.delimiter).into_iter();
    if options.has_header {
        rows.next();
    }

    let mut ledger = ParsedLedger::default();
    for row in rows {
        if row.fields.len() < MIN_FIELDS_PER_ROW {
            continue;
        }
        match parse_row(&row.fields, &options.date_format) {
            Ok(record) => ledger.records.push(record),
            Err(err) => {
                tracing::warn!(line = row.line, error = %err, "Skipping invalid ledger row");
                ledger.warnings.push(RowWarning {
                    line: row.line,
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(ledger)
}

fn parse_row(fields: &[String], date_format: &str) -> Result<StatementRecord, LedgerError> {
    let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("");

    let record = StatementRecord {
        date: parse_date(field(0), date_format)?,
        node_id: field(1).to_string(),
        node_name: field(2).to_string(),
        node_type: field(3).to_string(),
        region: optional_text(field(4)),
        utilization_hours: parse_decimal("Utilization Hours", field(5))?,
        total_hours: parse_decimal("Total Hours", field(6))?,
        utilization_percent: parse_decimal("Utilization %", field(7))?,
        price_per_hour: parse_decimal("Price per Hour", field(8))?,
        gross_revenue_usd: parse_decimal("Gross Revenue", field(9))?,
        rev_share_percent: parse_decimal("Rev Share %", field(10))?,
        operator_cut_usd: parse_decimal("Operator Cut", field(11))?,
        owner_cut_usd: parse_decimal("Owner Cut", field(12))?,
        uptime: parse_decimal("Uptime %", field(13))?,
        notes: optional_text(field(14)),
    };
    record.validate()?;
    Ok(record)
}

fn parse_date(raw: &str, date_format: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), date_format).map_err(|err| {
        LedgerError::Validation(format!(
            "Date '{raw}' does not match format '{date_format}': {err}"
        ))
    })
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| LedgerError::Validation(format!("{column} '{raw}' is not a number")))
}

fn optional_text(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

/// One logical row: its starting line and its unescaped fields.
#[derive(Debug, PartialEq)]
struct Row {
    line: usize,
    fields: Vec<String>,
}

/// Splits text into rows of fields with a two-state scanner.
///
/// Outside quotes, the delimiter ends a field and `\n`, `\r\n` or a lone
/// `\r` ends a row. Inside quotes every character is literal except `"`,
/// which either closes the quotes or, when doubled, stands for one quote.
/// Blank lines produce no row.
fn tokenize(input: &str, delimiter: char) -> Vec<Row> {
    let mut scanner = Scanner {
        chars: input.chars().peekable(),
        delimiter,
        line: 1,
    };
    let mut rows = Vec::new();
    while let Some(row) = scanner.next_row() {
        if !(row.fields.len() == 1 && row.fields[0].is_empty()) {
            rows.push(row);
        }
    }
    rows
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
    line: usize,
}

impl Scanner<'_> {
    fn next_row(&mut self) -> Option<Row> {
        self.chars.peek()?;

        let start = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(c) = self.chars.next() {
            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' => in_quotes = true,
                c if c == self.delimiter => fields.push(std::mem::take(&mut field)),
                '\r' => {
                    if self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    self.line += 1;
                    break;
                }
                '\n' => {
                    self.line += 1;
                    break;
                }
                _ => field.push(c),
            }
        }

        fields.push(field);
        Some(Row { line: start, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(input: &str) -> Vec<Vec<String>> {
        tokenize(input, ',').into_iter().map(|row| row.fields).collect()
    }

    #[test]
    fn plain_rows_split_on_delimiter() {
        assert_eq!(fields("a,b,c\n1,2,3"), [["a", "b", "c"], ["1", "2", "3"]]);
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(fields(",a,,"), [["", "a", "", ""]]);
    }

    #[test]
    fn quoted_fields_keep_delimiters_quotes_and_newlines() {
        assert_eq!(
            fields("\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\nnext"),
            vec![
                vec!["a,b".to_string(), "say \"hi\"".to_string(), "two\nlines".to_string()],
                vec!["next".to_string()],
            ]
        );
    }

    #[test]
    fn crlf_and_blank_lines() {
        assert_eq!(fields("a,b\r\n\r\nc,d\r\n"), [["a", "b"], ["c", "d"]]);
        assert!(fields("").is_empty());
        assert!(fields("\n\n").is_empty());
    }

    #[test]
    fn rows_remember_their_starting_line() {
        let rows = tokenize("h\n\"multi\nline\",x\n\nlast", ',');
        let lines: Vec<usize> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, [1, 2, 5]);
    }

    #[test]
    fn custom_delimiter() {
        assert_eq!(tokenize("a;b,c", ';')[0].fields, ["a", "b,c"]);
    }

    const HEADER: &str = "Date,Node ID,Node Name,Node Type,Region,Utilization Hours,Total Hours,Utilization %,Price per Hour (USD),Gross Revenue (USD),Rev Share %,Operator Cut (USD),Owner Cut (USD),Uptime %,Notes";

    #[test]
    fn good_rows_survive_bad_rows() {
        let csv = [
            HEADER,
            "2024-01-01,node-1,Alpha,cpu,us-east,10.00,24.00,41.67,1.00,10.00,20.00,2.00,8.00,99.00,",
            "2024-01-02,node-2,Beta,cpu,,10.00,24.00,41.67,1.00,10.00,150.00,15.00,-5.00,99.00,",
            "too,short",
            "not-a-date,node-3,Gamma,gpu,,1,1,100,1,1,10,0.1,0.9,100,",
            "2024-01-03,node-4,Delta,gpu,,5.00,24.00,20.83,2.00,10.00,10.00,1.00,9.00",
        ]
        .join("\n");

        let parsed = parse_csv_to_records(&csv, &ParseOptions::default()).unwrap();
        let ids: Vec<&str> = parsed.records.iter().map(|r| r.node_id.as_str()).collect();
        assert_eq!(ids, ["node-1"]);
        assert_eq!(parsed.records[0].region.as_deref(), Some("us-east"));
        assert_eq!(parsed.records[0].notes, None);

        let warned: Vec<usize> = parsed.warnings.iter().map(|w| w.line).collect();
        assert_eq!(warned, [3, 5, 6]);
        assert!(parsed.warnings[2].message.contains("Uptime %"));
    }

    #[test]
    fn without_header_the_first_row_is_data() {
        let row = "2024-01-01,node-1,Alpha,cpu,,10,24,41.67,1,10,20,2,8,99,";
        let options = ParseOptions {
            has_header: false,
            ..Default::default()
        };
        assert_eq!(parse_csv_to_records(row, &options).unwrap().records.len(), 1);
        assert!(
            parse_csv_to_records(row, &ParseOptions::default())
                .unwrap()
                .records
                .is_empty()
        );
    }

    #[test]
    fn unusable_delimiter_is_an_error() {
        let options = ParseOptions {
            delimiter: '\n',
            ..Default::default()
        };
        assert_eq!(
            parse_csv_to_records("", &options),
            Err(LedgerError::InvalidDelimiter('\n'))
        );
    }
}
