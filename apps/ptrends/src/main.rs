//! ptrends - periodic-table heatmaps from the command line
//!
//! Reads a CSV of element symbols and values and writes the table as SVG.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use ptrends_core::{plot, PlotWarning};
use ptrends_io::CsvTable;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, CliError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.plot_config()?;
    let table = CsvTable::from_path(&cli.filename, &cli.csv_options()?)?;
    let rows = table.rows_for(cli.elements_column.as_deref(), cli.data_column.as_deref())?;
    info!("Read {} rows from {}", rows.len(), cli.filename.display());

    let result = plot(&rows, &config)?;

    let warnings = &result.assignment.warnings;
    if !warnings.is_empty() {
        let unknown = warnings
            .iter()
            .filter(|w| matches!(w, PlotWarning::UnknownSymbol { .. }))
            .count();
        eprintln!(
            "Skipped {} of {} rows ({} unknown symbols, {} duplicates)",
            warnings.len(),
            rows.len(),
            unknown,
            warnings.len() - unknown
        );
    }

    if config.display_interactively {
        print!("{}", result.figure.to_svg());
    }
    Ok(())
}
