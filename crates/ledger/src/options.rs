use configuration::StatementSettings;

use crate::error::LedgerError;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;
pub const DEFAULT_CURRENCY: &str = "USD";

/// Controls how records are rendered as ledger text.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub include_header: bool,
    /// A `chrono` strftime pattern.
    pub date_format: String,
    pub delimiter: char,
    /// Fractional digits written for every numeric column.
    pub decimal_places: u32,
    /// Suffix for the money column headers, e.g. `Price per Hour (USD)`.
    pub currency: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            delimiter: DEFAULT_DELIMITER,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl From<&StatementSettings> for CsvOptions {
    fn from(settings: &StatementSettings) -> Self {
        Self {
            include_header: settings.include_header,
            date_format: settings.date_format.clone(),
            delimiter: settings.delimiter_char(),
            decimal_places: settings.decimal_places,
            currency: settings.currency.clone(),
        }
    }
}

/// Controls how ledger text is read back into records.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Skip the first non-blank row.
    pub has_header: bool,
    pub delimiter: char,
    pub date_format: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: DEFAULT_DELIMITER,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl From<&StatementSettings> for ParseOptions {
    fn from(settings: &StatementSettings) -> Self {
        Self {
            has_header: settings.include_header,
            delimiter: settings.delimiter_char(),
            date_format: settings.date_format.clone(),
        }
    }
}

impl From<&CsvOptions> for ParseOptions {
    /// Options that read back exactly what `options` writes.
    fn from(options: &CsvOptions) -> Self {
        Self {
            has_header: options.include_header,
            delimiter: options.delimiter,
            date_format: options.date_format.clone(),
        }
    }
}

/// Quotes and line breaks are structural and cannot separate fields.
pub(crate) fn check_delimiter(delimiter: char) -> Result<(), LedgerError> {
    match delimiter {
        '"' | '\n' | '\r' => Err(LedgerError::InvalidDelimiter(delimiter)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_map_onto_both_directions() {
        let settings = StatementSettings {
            include_header: false,
            date_format: "%d/%m/%Y".to_string(),
            delimiter: ";".to_string(),
            decimal_places: 4,
            currency: "EUR".to_string(),
        };

        let write = CsvOptions::from(&settings);
        assert_eq!(write.delimiter, ';');
        assert_eq!(write.decimal_places, 4);
        assert_eq!(write.currency, "EUR");

        let read = ParseOptions::from(&settings);
        assert!(!read.has_header);
        assert_eq!(read, ParseOptions::from(&write));
    }

    #[test]
    fn structural_delimiters_are_rejected() {
        assert_eq!(check_delimiter('"'), Err(LedgerError::InvalidDelimiter('"')));
        assert!(check_delimiter('\n').is_err());
        assert!(check_delimiter('\t').is_ok());
    }
}
