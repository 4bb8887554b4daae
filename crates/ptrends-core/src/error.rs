//! Error and warning types for ptrends-core
//!
//! Fatal conditions abort a plot call and are reported as [`PlotError`].
//! Cell-level anomalies never abort; they are collected as [`PlotWarning`]s
//! while the pass runs to completion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for plot operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// Malformed configuration (alpha, dimensions, colors, bounds, layout)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Logarithmic scale requested over negative data
    #[error("Entry {value} is negative but log-scale is selected")]
    InvalidScale { value: f64 },

    /// Parsed symbol and value lists have different lengths
    #[error("Unequal number of atomic elements ({symbols}) and data points ({values})")]
    RowCountMismatch { symbols: usize, values: usize },

    /// A table with three or more columns was given without column names
    #[error("The table has {columns} columns, but the columns to plot have not been assigned")]
    AmbiguousColumn { columns: usize },

    /// Any other input failure (unreadable table, bad column name, bad value)
    #[error("Input error: {0}")]
    Input(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for plot operations
pub type PlotResult<T> = Result<T, PlotError>;

/// A recoverable, cell-level diagnostic
///
/// `row` is the zero-based index of the offending input row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotWarning {
    /// The row names a symbol that is not in the reference table
    UnknownSymbol { row: usize, symbol: String },

    /// The row names an element that an earlier row already claimed
    DuplicateSymbol { row: usize, symbol: String },
}

impl PlotWarning {
    /// Index of the input row that triggered the warning
    pub fn row(&self) -> usize {
        match self {
            PlotWarning::UnknownSymbol { row, .. } | PlotWarning::DuplicateSymbol { row, .. } => {
                *row
            }
        }
    }

    /// The symbol as it appeared in the input
    pub fn symbol(&self) -> &str {
        match self {
            PlotWarning::UnknownSymbol { symbol, .. }
            | PlotWarning::DuplicateSymbol { symbol, .. } => symbol,
        }
    }
}

impl std::fmt::Display for PlotWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotWarning::UnknownSymbol { row, symbol } => {
                write!(f, "Invalid chemical symbol: {} (row {})", symbol, row)
            }
            PlotWarning::DuplicateSymbol { row, symbol } => {
                write!(f, "Multiple entries for element {} (row {})", symbol, row)
            }
        }
    }
}

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate a `#rrggbb` color option
    pub fn validate_hex_color(option: &str, value: &str) -> PlotResult<()> {
        let hex = value.strip_prefix('#').unwrap_or("");
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlotError::InvalidConfiguration(format!(
                "{} must be a #rrggbb color, got '{}'",
                option, value
            )));
        }
        Ok(())
    }

    /// Validate that an optional numeric option is finite
    pub fn validate_finite(option: &str, value: Option<f64>) -> PlotResult<()> {
        match value {
            Some(v) if !v.is_finite() => Err(PlotError::InvalidConfiguration(format!(
                "{} must be a finite number, got {}",
                option, v
            ))),
            _ => Ok(()),
        }
    }

    /// Validate that a dimension is not negative
    pub fn validate_non_negative(option: &str, value: i64) -> PlotResult<()> {
        if value < 0 {
            return Err(PlotError::InvalidConfiguration(format!(
                "{} must be a positive integer, got {}",
                option, value
            )));
        }
        Ok(())
    }
}
