//! Cell color assignment
//!
//! Associates every input row with at most one reference cell and decides
//! the cell's final color. Rows are processed in input order and the first
//! row to give a cell a color wins; later rows for the same element only
//! produce a warning. A cell left blank by a missing value stays open.
//! Highlights are applied afterwards over the reference table.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use crate::elements::ReferenceTable;
use crate::error::PlotWarning;
use crate::types::{CellColor, DataRow, SourceKind};

/// Value at or beyond which a cell gets a fixed color
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub color: String,
}

/// Override colors applied during assignment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignOptions {
    /// Color of cells without data
    pub blank_color: String,
    /// Values `<=` this threshold use its color
    pub under: Option<Threshold>,
    /// Values `>=` this threshold use its color
    pub over: Option<Threshold>,
    /// Symbols (exact reference casing) painted with `highlight_color`
    pub highlight_symbols: HashSet<String>,
    pub highlight_color: String,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            blank_color: "#c4c4c4".to_string(),
            under: None,
            over: None,
            highlight_symbols: HashSet::new(),
            highlight_color: "#6f3023".to_string(),
        }
    }
}

/// Result of one assignment pass
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    /// One entry per reference element, in reference order
    pub cells: Vec<CellColor>,
    /// For each input row, the cell it claimed (if any)
    pub row_cells: Vec<Option<usize>>,
    /// Recoverable diagnostics in the order they occurred
    pub warnings: Vec<PlotWarning>,
}

impl Assignment {
    /// Cell for a reference symbol (exact casing)
    pub fn cell(&self, symbol: &str) -> Option<&CellColor> {
        self.cells.iter().find(|c| c.symbol == symbol)
    }

    /// For each cell, the index of the row that claimed it
    pub fn claiming_rows(&self) -> Vec<Option<usize>> {
        let mut claims = vec![None; self.cells.len()];
        for (row, cell) in self.row_cells.iter().enumerate() {
            if let Some(cell) = cell {
                claims[*cell] = Some(row);
            }
        }
        claims
    }
}

/// Assign a final color to every reference cell
///
/// `resolved` holds the scaled color of each row (`None` for missing
/// values) and must be index-aligned with `rows`.
pub fn assign_colors(
    rows: &[DataRow],
    reference: &ReferenceTable,
    options: &AssignOptions,
    resolved: &[Option<String>],
) -> Assignment {
    let mut cells: Vec<CellColor> = reference
        .records()
        .iter()
        .map(|r| CellColor {
            symbol: r.symbol.clone(),
            color: options.blank_color.clone(),
            source: SourceKind::Blank,
        })
        .collect();
    let mut row_cells = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let Some(index) = reference.find(&row.symbol) else {
            let warning = PlotWarning::UnknownSymbol {
                row: i,
                symbol: row.symbol.clone(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            row_cells.push(None);
            continue;
        };

        if cells[index].source != SourceKind::Blank {
            let warning = PlotWarning::DuplicateSymbol {
                row: i,
                symbol: row.symbol.clone(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            row_cells.push(None);
            continue;
        }

        row_cells.push(Some(index));

        let cell = &mut cells[index];
        let (color, source) = match row.present_value() {
            None => (options.blank_color.clone(), SourceKind::Blank),
            Some(v) => match (&options.under, &options.over) {
                (Some(under), _) if v <= under.value => (under.color.clone(), SourceKind::Threshold),
                (_, Some(over)) if v >= over.value => (over.color.clone(), SourceKind::Threshold),
                _ => match resolved.get(i).and_then(|c| c.as_ref()) {
                    Some(color) => (color.clone(), SourceKind::Scaled),
                    None => (options.blank_color.clone(), SourceKind::Blank),
                },
            },
        };
        cell.color = color;
        cell.source = source;
    }

    for symbol in &options.highlight_symbols {
        if let Some(index) = reference.position_exact(symbol) {
            let cell = &mut cells[index];
            cell.color = options.highlight_color.clone();
            cell.source = SourceKind::Highlighted;
        }
    }

    Assignment {
        cells,
        row_cells,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static ReferenceTable {
        ReferenceTable::standard()
    }

    fn scaled(rows: &[DataRow]) -> Vec<Option<String>> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| r.present_value().map(|_| format!("#00000{}", i)))
            .collect()
    }

    #[test]
    fn test_unmatched_elements_stay_blank() {
        let rows = vec![DataRow::with_value("H", 1.0)];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));

        assert_eq!(result.cells.len(), 118);
        assert_eq!(result.cell("H").unwrap().source, SourceKind::Scaled);
        assert_eq!(result.cell("H").unwrap().color, "#000000");
        for cell in result.cells.iter().filter(|c| c.symbol != "H") {
            assert_eq!(cell.color, "#c4c4c4");
            assert_eq!(cell.source, SourceKind::Blank);
        }
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_case_insensitive_matching() {
        for symbol in ["fe", "Fe", "FE"] {
            let rows = vec![DataRow::with_value(symbol, 2.0)];
            let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
            assert_eq!(result.cell("Fe").unwrap().source, SourceKind::Scaled);
            assert_eq!(result.row_cells, vec![table().find("Fe")]);
        }
    }

    #[test]
    fn test_unknown_symbol_warns_and_skips() {
        let rows = vec![
            DataRow::with_value("Xx", 1.0),
            DataRow::with_value("He", 2.0),
        ];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
        assert_eq!(
            result.warnings,
            vec![PlotWarning::UnknownSymbol {
                row: 0,
                symbol: "Xx".to_string()
            }]
        );
        assert_eq!(result.row_cells[0], None);
        assert_eq!(result.cell("He").unwrap().color, "#000001");
    }

    #[test]
    fn test_first_duplicate_wins() {
        let rows = vec![DataRow::with_value("Fe", -2.0), DataRow::with_value("fe", 9.0)];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
        assert_eq!(result.cell("Fe").unwrap().color, "#000000");
        assert_eq!(
            result.warnings,
            vec![PlotWarning::DuplicateSymbol {
                row: 1,
                symbol: "fe".to_string()
            }]
        );
        assert_eq!(result.row_cells[1], None);
    }

    #[test]
    fn test_missing_value_leaves_cell_open() {
        let rows = vec![
            DataRow::missing("Na"),
            DataRow::with_value("Na", 3.0),
            DataRow::with_value("H", 1.0),
        ];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
        let na = result.cell("Na").unwrap();
        assert_eq!(na.source, SourceKind::Scaled);
        assert_eq!(na.color, "#000001");
        assert!(result.warnings.is_empty());
        assert_eq!(result.claiming_rows()[table().find("Na").unwrap()], Some(1));
    }

    #[test]
    fn test_colored_cell_rejects_later_missing_value() {
        let rows = vec![DataRow::with_value("Na", 3.0), DataRow::missing("na")];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
        assert_eq!(result.cell("Na").unwrap().source, SourceKind::Scaled);
        assert_eq!(
            result.warnings,
            vec![PlotWarning::DuplicateSymbol {
                row: 1,
                symbol: "na".to_string()
            }]
        );
    }

    #[test]
    fn test_non_finite_field_value_is_blank() {
        let rows = vec![DataRow {
            symbol: "H".to_string(),
            value: Some(f64::NAN),
        }];
        let resolved = vec![Some("#0c0786".to_string())];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &resolved);
        let h = result.cell("H").unwrap();
        assert_eq!(h.source, SourceKind::Blank);
        assert_eq!(h.color, "#c4c4c4");
    }

    #[test]
    fn test_thresholds() {
        let options = AssignOptions {
            under: Some(Threshold {
                value: 0.0,
                color: "#111111".to_string(),
            }),
            over: Some(Threshold {
                value: 10.0,
                color: "#222222".to_string(),
            }),
            ..Default::default()
        };
        let rows = vec![
            DataRow::with_value("H", 0.0),
            DataRow::with_value("He", 5.0),
            DataRow::with_value("Li", 10.0),
        ];
        let result = assign_colors(&rows, table(), &options, &scaled(&rows));
        assert_eq!(result.cell("H").unwrap().color, "#111111");
        assert_eq!(result.cell("H").unwrap().source, SourceKind::Threshold);
        assert_eq!(result.cell("He").unwrap().source, SourceKind::Scaled);
        assert_eq!(result.cell("Li").unwrap().color, "#222222");
        assert_eq!(result.cell("Li").unwrap().source, SourceKind::Threshold);
    }

    #[test]
    fn test_under_checked_before_over() {
        let options = AssignOptions {
            under: Some(Threshold {
                value: 5.0,
                color: "#111111".to_string(),
            }),
            over: Some(Threshold {
                value: 1.0,
                color: "#222222".to_string(),
            }),
            ..Default::default()
        };
        let rows = vec![DataRow::with_value("H", 3.0)];
        let result = assign_colors(&rows, table(), &options, &scaled(&rows));
        assert_eq!(result.cell("H").unwrap().color, "#111111");
    }

    #[test]
    fn test_highlight_always_wins() {
        let options = AssignOptions {
            over: Some(Threshold {
                value: 1.0,
                color: "#222222".to_string(),
            }),
            highlight_symbols: ["O", "Ar"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let rows = vec![DataRow::with_value("O", 99.0)];
        let result = assign_colors(&rows, table(), &options, &scaled(&rows));
        let o = result.cell("O").unwrap();
        assert_eq!(o.color, "#6f3023");
        assert_eq!(o.source, SourceKind::Highlighted);
        // Highlighting does not need a data row
        assert_eq!(result.cell("Ar").unwrap().source, SourceKind::Highlighted);
    }

    #[test]
    fn test_highlight_uses_reference_casing() {
        let options = AssignOptions {
            highlight_symbols: ["fe", "Xx", "Cu"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let result = assign_colors(&[], table(), &options, &[]);
        assert_eq!(result.cell("Fe").unwrap().source, SourceKind::Blank);
        assert_eq!(result.cell("Cu").unwrap().source, SourceKind::Highlighted);
        let highlighted = result
            .cells
            .iter()
            .filter(|c| c.source == SourceKind::Highlighted)
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn test_claiming_rows() {
        let rows = vec![
            DataRow::with_value("Fe", 1.0),
            DataRow::with_value("fe", 2.0),
            DataRow::with_value("H", 3.0),
        ];
        let result = assign_colors(&rows, table(), &AssignOptions::default(), &scaled(&rows));
        let claims = result.claiming_rows();
        assert_eq!(claims[table().find("Fe").unwrap()], Some(0));
        assert_eq!(claims[table().find("H").unwrap()], Some(2));
        assert_eq!(claims[table().find("He").unwrap()], None);
    }
}
