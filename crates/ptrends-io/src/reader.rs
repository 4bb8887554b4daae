//! Ingestion errors and row conversion
//!
//! Everything that can go wrong between a file on disk and a list of
//! [`DataRow`]s, plus the cell-level parsing rules shared by all readers.

use ptrends_core::{DataRow, PlotError};
use thiserror::Error;

/// Errors that can occur during ingestion
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("The table has {columns} columns, but the columns to plot have not been assigned")]
    AmbiguousColumn { columns: usize },

    #[error("Invalid value '{value}' on line {line}")]
    InvalidValue { line: u64, value: String },

    #[error("Unequal number of atomic elements ({symbols}) and data points ({values})")]
    RowCountMismatch { symbols: usize, values: usize },
}

/// Result type for ingestion
pub type IoResult<T> = Result<T, IoError>;

impl From<IoError> for PlotError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::AmbiguousColumn { columns } => PlotError::AmbiguousColumn { columns },
            IoError::RowCountMismatch { symbols, values } => {
                PlotError::RowCountMismatch { symbols, values }
            }
            other => PlotError::Input(other.to_string()),
        }
    }
}

/// Parse a value cell
///
/// Blank cells and `nan` (any casing) are missing. Infinite values are
/// treated as missing too.
pub fn parse_value(raw: &str, line: u64) -> IoResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value: f64 = trimmed.parse().map_err(|_| IoError::InvalidValue {
        line,
        value: raw.to_string(),
    })?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

/// Build a row from raw symbol and value cells
pub fn to_row(symbol: &str, value: &str, line: u64) -> IoResult<DataRow> {
    Ok(DataRow::new(symbol.trim(), parse_value(value, line)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("13.6", 1).unwrap(), Some(13.6));
        assert_eq!(parse_value(" -2 ", 1).unwrap(), Some(-2.0));
        assert_eq!(parse_value("1e3", 1).unwrap(), Some(1000.0));
        assert_eq!(parse_value("", 1).unwrap(), None);
        assert_eq!(parse_value("NaN", 1).unwrap(), None);
        assert_eq!(parse_value("inf", 1).unwrap(), None);
    }

    #[test]
    fn test_parse_value_rejects_text() {
        match parse_value("high", 7) {
            Err(IoError::InvalidValue { line, value }) => {
                assert_eq!(line, 7);
                assert_eq!(value, "high");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_to_row_trims_symbol() {
        let row = to_row("  Fe ", "7.9", 2).unwrap();
        assert_eq!(row.symbol, "Fe");
        assert_eq!(row.value, Some(7.9));
    }

    #[test]
    fn test_conversion_into_plot_error() {
        let err: PlotError = IoError::AmbiguousColumn { columns: 3 }.into();
        assert!(matches!(err, PlotError::AmbiguousColumn { columns: 3 }));

        let err: PlotError = IoError::RowCountMismatch {
            symbols: 4,
            values: 3,
        }
        .into();
        assert!(matches!(
            err,
            PlotError::RowCountMismatch {
                symbols: 4,
                values: 3
            }
        ));

        let err: PlotError = IoError::ColumnNotFound("mass".to_string()).into();
        match err {
            PlotError::Input(message) => assert!(message.contains("mass")),
            other => panic!("expected Input, got {:?}", other),
        }
    }
}
