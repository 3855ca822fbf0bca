//! # Nodeyield Ledger
//!
//! Owner payout statements: per-node statement records, period summaries,
//! and the CSV ledger text they are exported to and read back from.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** No I/O. Callers hand in records or ledger text and get
//!   values back; writing files is the binary's job.
//! - **Exact Money:** Amounts are `rust_decimal::Decimal`, so a ledger written at
//!   a given precision reads back to the same figures.
//! - **Byte-Stable Wire Format:** Column order, header text and the quoting rule
//!   are fixed. Lines are joined with `\n` with no trailing newline.
//! - **Partial Failure on Import:** A bad row is skipped and reported, never
//!   allowed to block the good ones.
//!
//! ## Public API
//!
//! - `StatementRecord`, `NodeUsage`: one node-period row and the usage it is built from.
//! - `generate_statement_summary`, `generate_monthly_statement`: aggregation.
//! - `records_to_csv`, `export_statement_summary_to_csv`: rendering, driven by `CsvOptions`.
//! - `parse_csv_to_records`: import, driven by `ParseOptions`, returning a `ParsedLedger`.

pub mod error;
pub mod options;
pub mod reader;
pub mod record;
pub mod summary;
pub mod writer;

pub use error::LedgerError;
pub use options::{CsvOptions, ParseOptions};
pub use reader::{MIN_FIELDS_PER_ROW, ParsedLedger, RowWarning, parse_csv_to_records};
pub use record::{NodeUsage, StatementRecord};
pub use summary::{StatementSummary, generate_monthly_statement, generate_statement_summary};
pub use writer::{COLUMN_COUNT, export_statement_summary_to_csv, records_to_csv};
