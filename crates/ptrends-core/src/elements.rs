//! Periodic-table reference geometry
//!
//! The standard table is built once per process and never mutated. Each plot
//! call derives its own copy with [`ReferenceTable::for_layout`], which is
//! where the lanthanoid/actinoid rows are broken out.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use crate::error::{PlotError, PlotResult};
use crate::types::{ElementRecord, GroupSlot, PeriodSlot};

/// (symbol, atomic number, group or 0 for f-block, period)
const ELEMENTS: [(&str, u32, u8, u8); 118] = [
    ("H", 1, 1, 1),
    ("He", 2, 18, 1),
    ("Li", 3, 1, 2),
    ("Be", 4, 2, 2),
    ("B", 5, 13, 2),
    ("C", 6, 14, 2),
    ("N", 7, 15, 2),
    ("O", 8, 16, 2),
    ("F", 9, 17, 2),
    ("Ne", 10, 18, 2),
    ("Na", 11, 1, 3),
    ("Mg", 12, 2, 3),
    ("Al", 13, 13, 3),
    ("Si", 14, 14, 3),
    ("P", 15, 15, 3),
    ("S", 16, 16, 3),
    ("Cl", 17, 17, 3),
    ("Ar", 18, 18, 3),
    ("K", 19, 1, 4),
    ("Ca", 20, 2, 4),
    ("Sc", 21, 3, 4),
    ("Ti", 22, 4, 4),
    ("V", 23, 5, 4),
    ("Cr", 24, 6, 4),
    ("Mn", 25, 7, 4),
    ("Fe", 26, 8, 4),
    ("Co", 27, 9, 4),
    ("Ni", 28, 10, 4),
    ("Cu", 29, 11, 4),
    ("Zn", 30, 12, 4),
    ("Ga", 31, 13, 4),
    ("Ge", 32, 14, 4),
    ("As", 33, 15, 4),
    ("Se", 34, 16, 4),
    ("Br", 35, 17, 4),
    ("Kr", 36, 18, 4),
    ("Rb", 37, 1, 5),
    ("Sr", 38, 2, 5),
    ("Y", 39, 3, 5),
    ("Zr", 40, 4, 5),
    ("Nb", 41, 5, 5),
    ("Mo", 42, 6, 5),
    ("Tc", 43, 7, 5),
    ("Ru", 44, 8, 5),
    ("Rh", 45, 9, 5),
    ("Pd", 46, 10, 5),
    ("Ag", 47, 11, 5),
    ("Cd", 48, 12, 5),
    ("In", 49, 13, 5),
    ("Sn", 50, 14, 5),
    ("Sb", 51, 15, 5),
    ("Te", 52, 16, 5),
    ("I", 53, 17, 5),
    ("Xe", 54, 18, 5),
    ("Cs", 55, 1, 6),
    ("Ba", 56, 2, 6),
    ("La", 57, 0, 6),
    ("Ce", 58, 0, 6),
    ("Pr", 59, 0, 6),
    ("Nd", 60, 0, 6),
    ("Pm", 61, 0, 6),
    ("Sm", 62, 0, 6),
    ("Eu", 63, 0, 6),
    ("Gd", 64, 0, 6),
    ("Tb", 65, 0, 6),
    ("Dy", 66, 0, 6),
    ("Ho", 67, 0, 6),
    ("Er", 68, 0, 6),
    ("Tm", 69, 0, 6),
    ("Yb", 70, 0, 6),
    ("Lu", 71, 3, 6),
    ("Hf", 72, 4, 6),
    ("Ta", 73, 5, 6),
    ("W", 74, 6, 6),
    ("Re", 75, 7, 6),
    ("Os", 76, 8, 6),
    ("Ir", 77, 9, 6),
    ("Pt", 78, 10, 6),
    ("Au", 79, 11, 6),
    ("Hg", 80, 12, 6),
    ("Tl", 81, 13, 6),
    ("Pb", 82, 14, 6),
    ("Bi", 83, 15, 6),
    ("Po", 84, 16, 6),
    ("At", 85, 17, 6),
    ("Rn", 86, 18, 6),
    ("Fr", 87, 1, 7),
    ("Ra", 88, 2, 7),
    ("Ac", 89, 0, 7),
    ("Th", 90, 0, 7),
    ("Pa", 91, 0, 7),
    ("U", 92, 0, 7),
    ("Np", 93, 0, 7),
    ("Pu", 94, 0, 7),
    ("Am", 95, 0, 7),
    ("Cm", 96, 0, 7),
    ("Bk", 97, 0, 7),
    ("Cf", 98, 0, 7),
    ("Es", 99, 0, 7),
    ("Fm", 100, 0, 7),
    ("Md", 101, 0, 7),
    ("No", 102, 0, 7),
    ("Lr", 103, 3, 7),
    ("Rf", 104, 4, 7),
    ("Db", 105, 5, 7),
    ("Sg", 106, 6, 7),
    ("Bh", 107, 7, 7),
    ("Hs", 108, 8, 7),
    ("Mt", 109, 9, 7),
    ("Ds", 110, 10, 7),
    ("Rg", 111, 11, 7),
    ("Cn", 112, 12, 7),
    ("Nh", 113, 13, 7),
    ("Fl", 114, 14, 7),
    ("Mc", 115, 15, 7),
    ("Lv", 116, 16, 7),
    ("Ts", 117, 17, 7),
    ("Og", 118, 18, 7),
];

/// Atomic numbers broken out into the lanthanoid row
pub const LANTHANOIDS: std::ops::RangeInclusive<u32> = 57..=70;

/// Atomic numbers broken out into the actinoid row
pub const ACTINOIDS: std::ops::RangeInclusive<u32> = 89..=102;

/// First group used by a broken-out row
const EXTENDED_FIRST_GROUP: u32 = 4;

lazy_static! {
    static ref STANDARD_TABLE: ReferenceTable = ReferenceTable::build(
        ELEMENTS
            .iter()
            .map(|&(symbol, atomic_number, group, period)| ElementRecord {
                symbol: symbol.to_string(),
                atomic_number,
                group: if group == 0 {
                    GroupSlot::None
                } else {
                    GroupSlot::Group(group)
                },
                period: PeriodSlot::Row(period),
            })
            .collect(),
    );
}

/// An ordered set of element records with symbol lookup
#[derive(Clone, Debug)]
pub struct ReferenceTable {
    records: Vec<ElementRecord>,
    /// Lower-cased symbol -> record index
    by_lower: HashMap<String, usize>,
}

impl ReferenceTable {
    fn build(records: Vec<ElementRecord>) -> Self {
        let by_lower = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.symbol.to_lowercase(), i))
            .collect();
        Self { records, by_lower }
    }

    /// The shared standard table (118 elements, f-block inline)
    pub fn standard() -> &'static ReferenceTable {
        &STANDARD_TABLE
    }

    /// Build a table from externally supplied records
    ///
    /// Symbols must be unique (case-insensitively) and so must atomic numbers.
    pub fn from_records(records: Vec<ElementRecord>) -> PlotResult<Self> {
        let mut seen_numbers = HashSet::new();
        let mut seen_symbols = HashSet::new();
        for record in &records {
            if !seen_symbols.insert(record.symbol.to_lowercase()) {
                return Err(PlotError::InvalidConfiguration(format!(
                    "duplicate element symbol '{}' in reference table",
                    record.symbol
                )));
            }
            if !seen_numbers.insert(record.atomic_number) {
                return Err(PlotError::InvalidConfiguration(format!(
                    "duplicate atomic number {} in reference table",
                    record.atomic_number
                )));
            }
        }
        Ok(Self::build(records))
    }

    /// A call-local copy of this table for the requested layout
    ///
    /// With `extended`, atomic numbers 57-70 move to the `La` row and 89-102
    /// to the `Ac` row, taking groups 4 through 17 in order.
    pub fn for_layout(&self, extended: bool) -> ReferenceTable {
        let mut table = self.clone();
        if extended {
            for record in &mut table.records {
                let z = record.atomic_number;
                if LANTHANOIDS.contains(&z) {
                    record.period = PeriodSlot::Lanthanoid;
                    record.group = extended_group(z - LANTHANOIDS.start());
                } else if ACTINOIDS.contains(&z) {
                    record.period = PeriodSlot::Actinoid;
                    record.group = extended_group(z - ACTINOIDS.start());
                }
            }
        }
        table
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ElementRecord> {
        self.records.get(index)
    }

    /// Index of the record whose symbol matches case-insensitively
    pub fn find(&self, symbol: &str) -> Option<usize> {
        self.by_lower.get(&symbol.trim().to_lowercase()).copied()
    }

    /// Index of the record whose symbol matches exactly
    pub fn position_exact(&self, symbol: &str) -> Option<usize> {
        self.records.iter().position(|r| r.symbol == symbol)
    }
}

fn extended_group(offset: u32) -> GroupSlot {
    GroupSlot::Group((EXTENDED_FIRST_GROUP + offset) as u8)
}
