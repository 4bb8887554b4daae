//! CSV table reader

use ptrends_core::DataRow;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::columns::resolve_columns;
use crate::reader::{to_row, IoError, IoResult};

/// How to parse a CSV file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Whether the first record names the columns
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: false,
        }
    }
}

/// One data record and the line it started on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: u64,
    pub fields: Vec<String>,
}

/// A CSV file held in memory as named string columns
#[derive(Clone, Debug)]
pub struct CsvTable {
    columns: Vec<String>,
    records: Vec<CsvRecord>,
}

impl CsvTable {
    /// Read a CSV file
    pub fn from_path(path: impl AsRef<Path>, options: &CsvOptions) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let table = Self::from_reader(BufReader::new(file), options)?;
        debug!(
            path = %path.display(),
            columns = table.columns.len(),
            records = table.records.len(),
            "read csv table"
        );
        Ok(table)
    }

    /// Read CSV data from any reader
    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let header = if options.has_header {
            Some(
                reader
                    .headers()
                    .map_err(|e| IoError::InvalidFormat(e.to_string()))?
                    .iter()
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>(),
            )
        } else {
            None
        };

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            records.push(CsvRecord {
                line,
                fields: record.iter().map(|s| s.to_string()).collect(),
            });
        }

        let columns = header.unwrap_or_else(|| {
            // Generate column names
            let width = records.iter().map(|r| r.fields.len()).max().unwrap_or(0);
            (0..width).map(|i| format!("col_{}", i)).collect()
        });

        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[CsvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert two columns into rows, in file order
    ///
    /// Fails when some records are too short to hold a value (or a symbol)
    /// while others are not.
    pub fn data_rows(&self, elements: usize, data: usize) -> IoResult<Vec<DataRow>> {
        let symbols = self
            .records
            .iter()
            .filter(|r| r.fields.len() > elements)
            .count();
        let values = self.records.iter().filter(|r| r.fields.len() > data).count();
        if symbols != values {
            return Err(IoError::RowCountMismatch { symbols, values });
        }

        self.records
            .iter()
            .filter_map(|r| match (r.fields.get(elements), r.fields.get(data)) {
                (Some(symbol), Some(value)) => Some(to_row(symbol, value, r.line)),
                _ => None,
            })
            .collect()
    }

    /// Resolve the element and data columns by name, then convert
    pub fn rows_for(&self, elements: Option<&str>, data: Option<&str>) -> IoResult<Vec<DataRow>> {
        let (elements, data) = resolve_columns(&self.columns, elements, data)?;
        debug!(
            elements = %self.columns[elements],
            data = %self.columns[data],
            "resolved columns"
        );
        self.data_rows(elements, data)
    }
}

/// Read rows from a CSV file in one step
pub fn read_rows(
    path: impl AsRef<Path>,
    options: &CsvOptions,
    elements: Option<&str>,
    data: Option<&str>,
) -> IoResult<Vec<DataRow>> {
    CsvTable::from_path(path, options)?.rows_for(elements, data)
}
