use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid statement record: {0}")]
    Validation(String),

    #[error("Cannot generate a statement summary from zero records")]
    EmptyStatement,

    #[error("No records found for {month}/{year}")]
    NoRecordsForPeriod { month: u32, year: i32 },

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),

    #[error("Delimiter {0:?} cannot be a quote or line break")]
    InvalidDelimiter(char),

    /// A derived amount or running total exceeded the range of `Decimal`.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}
