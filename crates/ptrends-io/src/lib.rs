//! ptrends-io - Tabular input for ptrends
//!
//! Reads delimited text into named columns, resolves which columns hold the
//! element symbols and the values, and converts them into
//! [`ptrends_core::DataRow`]s.
//!
//! # Design
//!
//! Column resolution is a separate, pure step: tables wider than two columns
//! must name both columns explicitly.

pub mod columns;
pub mod csv_reader;
pub mod reader;

pub use columns::resolve_columns;
pub use csv_reader::{read_rows, CsvOptions, CsvRecord, CsvTable};
pub use reader::*;
