//! Plot configuration
//!
//! Every option of a plot call in one serde-friendly struct. Missing keys in
//! a TOML or JSON document fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::assign::{AssignOptions, Threshold};
use crate::colorbar::ColorBarConfig;
use crate::colormap::Palette;
use crate::error::{validation, PlotError, PlotResult};
use crate::scale::ScaleMode;

/// Color used for values beyond a threshold unless overridden
pub const DEFAULT_THRESHOLD_COLOR: &str = "#140f0e";

/// Options for one plot call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Color palette for the heatmap
    pub palette: Palette,
    /// Linear or logarithmic color scale
    pub scale: ScaleMode,
    /// Explicit lower end of the color range
    pub lower_bound: Option<f64>,
    /// Explicit upper end of the color range
    pub upper_bound: Option<f64>,

    /// Fill of cells without data
    pub blank_color: String,
    pub under_threshold: Option<f64>,
    pub under_color: String,
    pub over_threshold: Option<f64>,
    pub over_color: String,
    /// Symbols painted with `highlight_color` regardless of their data
    pub highlight_symbols: Vec<String>,
    pub highlight_color: String,

    /// Break the lanthanoids and actinoids out into their own rows
    pub include_extended_rows: bool,
    pub excluded_groups: Vec<u8>,
    pub excluded_periods: Vec<u8>,
    /// Shrink the canvas with the number of remaining groups and periods
    pub rescale_canvas: bool,

    pub print_values_on_cells: bool,
    pub value_decimal_places: usize,
    /// Appended to printed values, e.g. `" eV"`
    pub value_unit_suffix: Option<String>,

    /// Canvas size in pixels
    pub width: i64,
    pub height: i64,
    /// Cell fill opacity
    pub alpha: f64,
    pub title: Option<String>,

    /// Where to write the SVG, if anywhere
    pub output_path: Option<String>,
    pub display_interactively: bool,

    /// Color bar legend
    pub colorbar: ColorBarConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            palette: Palette::Plasma,
            scale: ScaleMode::Linear,
            lower_bound: None,
            upper_bound: None,
            blank_color: "#c4c4c4".to_string(),
            under_threshold: None,
            under_color: DEFAULT_THRESHOLD_COLOR.to_string(),
            over_threshold: None,
            over_color: DEFAULT_THRESHOLD_COLOR.to_string(),
            highlight_symbols: Vec::new(),
            highlight_color: "#6f3023".to_string(),
            include_extended_rows: true,
            excluded_groups: Vec::new(),
            excluded_periods: Vec::new(),
            rescale_canvas: true,
            print_values_on_cells: false,
            value_decimal_places: 1,
            value_unit_suffix: None,
            width: 1050,
            height: 600,
            alpha: 0.65,
            title: None,
            output_path: None,
            display_interactively: false,
            colorbar: ColorBarConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bounds(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn with_under(mut self, threshold: f64, color: impl Into<String>) -> Self {
        self.under_threshold = Some(threshold);
        self.under_color = color.into();
        self
    }

    pub fn with_over(mut self, threshold: f64, color: impl Into<String>) -> Self {
        self.over_threshold = Some(threshold);
        self.over_color = color.into();
        self
    }

    pub fn with_highlight<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extended_rows(mut self, extended: bool) -> Self {
        self.include_extended_rows = extended;
        self
    }

    pub fn with_size(mut self, width: i64, height: i64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> PlotResult<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(PlotError::InvalidConfiguration(format!(
                "alpha must be between 0 and 1, got {}",
                self.alpha
            )));
        }

        validation::validate_non_negative("width", self.width)?;
        validation::validate_non_negative("height", self.height)?;
        if let Some(height) = self.colorbar.height {
            validation::validate_non_negative("colorbar.height", height)?;
        }
        if self.colorbar.ticks == 0 {
            return Err(PlotError::InvalidConfiguration(
                "colorbar.ticks must be positive".to_string(),
            ));
        }

        for (option, color) in [
            ("blank_color", &self.blank_color),
            ("under_color", &self.under_color),
            ("over_color", &self.over_color),
            ("highlight_color", &self.highlight_color),
        ] {
            validation::validate_hex_color(option, color)?;
        }

        validation::validate_finite("lower_bound", self.lower_bound)?;
        validation::validate_finite("upper_bound", self.upper_bound)?;
        validation::validate_finite("under_threshold", self.under_threshold)?;
        validation::validate_finite("over_threshold", self.over_threshold)?;

        Ok(())
    }

    /// Override colors for the assignment pass
    pub fn assign_options(&self) -> AssignOptions {
        AssignOptions {
            blank_color: self.blank_color.clone(),
            under: self.under_threshold.map(|value| Threshold {
                value,
                color: self.under_color.clone(),
            }),
            over: self.over_threshold.map(|value| Threshold {
                value,
                color: self.over_color.clone(),
            }),
            highlight_symbols: self.highlight_symbols.iter().cloned().collect(),
            highlight_color: self.highlight_color.clone(),
        }
    }
}
