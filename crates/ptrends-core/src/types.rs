//! Core data types
//!
//! Input rows, reference-table records and per-cell color assignments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One input row: an element identifier and its value
///
/// The symbol need not match the reference casing. A missing value is
/// `None`; non-finite numbers are treated as missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub symbol: String,
    pub value: Option<f64>,
}

impl DataRow {
    /// Create a row, normalizing non-finite values to missing
    pub fn new(symbol: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            value: value.filter(|v| v.is_finite()),
        }
    }

    /// Create a row with a present value
    pub fn with_value(symbol: impl Into<String>, value: f64) -> Self {
        Self::new(symbol, Some(value))
    }

    /// Create a row with a missing value
    pub fn missing(symbol: impl Into<String>) -> Self {
        Self::new(symbol, None)
    }

    /// The value if it is present and finite
    ///
    /// Rows built field by field skip the normalization in [`DataRow::new`],
    /// so readers go through this instead of `value`.
    pub fn present_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Column position of an element in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSlot {
    /// Groups 1 through 18
    Group(u8),
    /// f-block elements have no inline group in the standard layout
    None,
}

/// Row position of an element in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodSlot {
    /// Periods 1 through 7
    Row(u8),
    /// The broken-out lanthanoid row
    Lanthanoid,
    /// The broken-out actinoid row
    Actinoid,
}

impl fmt::Display for GroupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSlot::Group(g) => write!(f, "{}", g),
            GroupSlot::None => f.write_str("-"),
        }
    }
}

impl fmt::Display for PeriodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSlot::Row(p) => write!(f, "{}", p),
            PeriodSlot::Lanthanoid => f.write_str("La"),
            PeriodSlot::Actinoid => f.write_str("Ac"),
        }
    }
}

/// A chemical element in the reference table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub symbol: String,
    pub atomic_number: u32,
    pub group: GroupSlot,
    pub period: PeriodSlot,
}

/// Where a cell's final color came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// No data, or a missing value
    Blank,
    /// Value at or beyond an under/over threshold
    Threshold,
    /// Listed in the highlight set
    Highlighted,
    /// Colored through the color scale
    Scaled,
}

/// Final color of one reference element
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellColor {
    pub symbol: String,
    pub color: String,
    pub source: SourceKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_row_normalizes_non_finite() {
        assert_eq!(DataRow::with_value("H", f64::NAN).value, None);
        assert_eq!(DataRow::with_value("H", f64::INFINITY).value, None);
        assert_eq!(DataRow::with_value("H", 1.5).value, Some(1.5));
        assert_eq!(DataRow::missing("H").value, None);
    }

    #[test]
    fn test_present_value_ignores_non_finite_fields() {
        let row = DataRow {
            symbol: "H".to_string(),
            value: Some(f64::NAN),
        };
        assert_eq!(row.present_value(), None);

        let row = DataRow {
            symbol: "H".to_string(),
            value: Some(f64::NEG_INFINITY),
        };
        assert_eq!(row.present_value(), None);
        assert_eq!(DataRow::with_value("H", 2.5).present_value(), Some(2.5));
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(GroupSlot::Group(18).to_string(), "18");
        assert_eq!(PeriodSlot::Row(7).to_string(), "7");
        assert_eq!(PeriodSlot::Lanthanoid.to_string(), "La");
        assert_eq!(PeriodSlot::Actinoid.to_string(), "Ac");
    }
}
