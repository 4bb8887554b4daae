//! Command-line arguments and their mapping onto [`PlotConfig`]

use std::path::{Path, PathBuf};

use clap::Parser;
use ptrends_core::{Palette, PlotConfig, PlotError, ScaleMode};
use ptrends_io::{CsvOptions, IoError};
use thiserror::Error;

/// Written when neither an output path nor `--show` is given
pub const DEFAULT_OUTPUT: &str = "ptable_trends.svg";

/// Errors reported by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Input(#[from] IoError),

    #[error("Failed to read config {path}: {message}")]
    Config { path: String, message: String },

    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    Delimiter(char),
}

/// Plot periodic trends as a heatmap over the periodic table
#[derive(Debug, Parser)]
#[command(name = "ptrends", version, about)]
pub struct Cli {
    /// CSV file with element symbols and values
    pub filename: PathBuf,

    /// Treat the first line as column names
    #[arg(long)]
    pub header: bool,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Column holding the element symbols
    #[arg(long, value_name = "NAME")]
    pub elements_column: Option<String>,

    /// Column holding the values
    #[arg(long, value_name = "NAME")]
    pub data_column: Option<String>,

    /// TOML file with plot options (flags take precedence)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color palette (e.g. plasma, viridis, RdBu, bwr)
    #[arg(long)]
    pub palette: Option<Palette>,

    /// Logarithmic color scale
    #[arg(long)]
    pub log_scale: bool,

    /// Lower end of the color range
    #[arg(long, allow_hyphen_values = true)]
    pub lower_bound: Option<f64>,

    /// Upper end of the color range
    #[arg(long, allow_hyphen_values = true)]
    pub upper_bound: Option<f64>,

    /// Fill of cells without data
    #[arg(long, value_name = "HEX")]
    pub blank_color: Option<String>,

    /// Values at or below this use --under-color
    #[arg(long, allow_hyphen_values = true)]
    pub under_value: Option<f64>,

    #[arg(long, value_name = "HEX")]
    pub under_color: Option<String>,

    /// Values at or above this use --over-color
    #[arg(long, allow_hyphen_values = true)]
    pub over_value: Option<f64>,

    #[arg(long, value_name = "HEX")]
    pub over_color: Option<String>,

    /// Elements to highlight
    #[arg(long, value_name = "SYMBOL", num_args = 1..)]
    pub highlight: Vec<String>,

    #[arg(long, value_name = "HEX")]
    pub highlight_color: Option<String>,

    /// Show the lanthanoids and actinoids as separate rows
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub extended: Option<bool>,

    /// Group(s) to remove
    #[arg(long, value_name = "GROUP", num_args = 1..)]
    pub group_remove: Vec<u8>,

    /// Period(s) to remove
    #[arg(long, value_name = "PERIOD", num_args = 1..)]
    pub period_remove: Vec<u8>,

    /// Keep the canvas size when groups or periods are removed
    #[arg(long)]
    pub no_rescale: bool,

    /// Print each element's value in its cell
    #[arg(long)]
    pub print_values: bool,

    /// Decimal places of printed values
    #[arg(long)]
    pub decimals: Option<usize>,

    /// Unit appended to printed values
    #[arg(long)]
    pub unit: Option<String>,

    /// Width (in pixels) of the figure
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<i64>,

    /// Height (in pixels) of the figure
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<i64>,

    /// Opacity of the cell fill (0 to 1)
    #[arg(long, allow_hyphen_values = true)]
    pub alpha: Option<f64>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub cbar_title: Option<String>,

    /// Number of color bar ticks to aim for
    #[arg(long)]
    pub cbar_ticks: Option<usize>,

    /// Height (in pixels) of the color bar
    #[arg(long, allow_hyphen_values = true)]
    pub cbar_height: Option<i64>,

    /// Distance (in pixels) between tick labels and the color bar
    #[arg(long)]
    pub cbar_standoff: Option<u32>,

    /// Font size (in pt) of the color bar tick labels
    #[arg(long)]
    pub cbar_fontsize: Option<u32>,

    /// Write the SVG here
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the SVG to stdout
    #[arg(long)]
    pub show: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn csv_options(&self) -> Result<CsvOptions, CliError> {
        if !self.delimiter.is_ascii() {
            return Err(CliError::Delimiter(self.delimiter));
        }
        Ok(CsvOptions {
            delimiter: self.delimiter as u8,
            has_header: self.header,
        })
    }

    /// Start from the config file (or defaults) and apply the flags on top
    pub fn plot_config(&self) -> Result<PlotConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PlotConfig::default(),
        };

        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        if self.log_scale {
            config.scale = ScaleMode::Log;
        }
        override_with(&mut config.lower_bound, self.lower_bound);
        override_with(&mut config.upper_bound, self.upper_bound);

        if let Some(color) = &self.blank_color {
            config.blank_color = color.clone();
        }
        override_with(&mut config.under_threshold, self.under_value);
        if let Some(color) = &self.under_color {
            config.under_color = color.clone();
        }
        override_with(&mut config.over_threshold, self.over_value);
        if let Some(color) = &self.over_color {
            config.over_color = color.clone();
        }
        if !self.highlight.is_empty() {
            config.highlight_symbols = self.highlight.clone();
        }
        if let Some(color) = &self.highlight_color {
            config.highlight_color = color.clone();
        }

        if let Some(extended) = self.extended {
            config.include_extended_rows = extended;
        }
        if !self.group_remove.is_empty() {
            config.excluded_groups = self.group_remove.clone();
        }
        if !self.period_remove.is_empty() {
            config.excluded_periods = self.period_remove.clone();
        }
        if self.no_rescale {
            config.rescale_canvas = false;
        }

        if self.print_values {
            config.print_values_on_cells = true;
        }
        if let Some(decimals) = self.decimals {
            config.value_decimal_places = decimals;
        }
        override_with(&mut config.value_unit_suffix, self.unit.clone());

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        override_with(&mut config.title, self.title.clone());

        override_with(&mut config.colorbar.title, self.cbar_title.clone());
        if let Some(ticks) = self.cbar_ticks {
            config.colorbar.ticks = ticks;
        }
        override_with(&mut config.colorbar.height, self.cbar_height);
        if let Some(standoff) = self.cbar_standoff {
            config.colorbar.standoff = standoff;
        }
        if let Some(size) = self.cbar_fontsize {
            config.colorbar.font_size = size;
        }

        if let Some(output) = &self.output {
            config.output_path = Some(output.to_string_lossy().into_owned());
        }
        if self.show {
            config.display_interactively = true;
        }
        if config.output_path.is_none() && !config.display_interactively {
            config.output_path = Some(DEFAULT_OUTPUT.to_string());
        }

        Ok(config)
    }
}

fn override_with<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

fn load_config(path: &Path) -> Result<PlotConfig, CliError> {
    let error = |message: String| CliError::Config {
        path: path.display().to_string(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| error(e.to_string()))?;
    PlotConfig::from_toml(&text).map_err(|e| error(e.to_string()))
}
