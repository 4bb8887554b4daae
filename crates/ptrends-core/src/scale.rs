//! Color scale resolution
//!
//! Turns a data series, a palette and a scale mode into a [`ColorDomain`]
//! and a [`ColorScale`] that maps individual values onto the palette's
//! 256-step ramp. The same scale yields the [`ColorMapper`] handed to the
//! legend, so cells and color bar always agree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colormap::{make_ramp, Palette, RAMP_SIZE};
use crate::error::{PlotError, PlotResult};
use crate::types::DataRow;

/// Linear or logarithmic normalization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Linear,
    #[serde(alias = "logarithmic")]
    Log,
}

impl ScaleMode {
    pub fn is_logarithmic(&self) -> bool {
        matches!(self, ScaleMode::Log)
    }
}

/// The effective value range of a color scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorDomain {
    pub low: f64,
    pub high: f64,
    pub divergent: bool,
    pub logarithmic: bool,
}

/// Min and max over present values, `None` when nothing is present
fn finite(data: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    data.iter().flatten().copied().filter(|v| v.is_finite())
}

fn present_extent(data: &[Option<f64>]) -> Option<(f64, f64)> {
    finite(data).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Resolve the `[low, high]` domain of a color scale
///
/// Missing values never take part in the min/max. Diverging palettes are
/// kept symmetric around zero; when only one explicit bound is supplied
/// the other one mirrors it.
pub fn resolve_domain(
    data: &[Option<f64>],
    divergent: bool,
    logarithmic: bool,
    explicit_low: Option<f64>,
    explicit_high: Option<f64>,
) -> PlotResult<ColorDomain> {
    for bound in [explicit_low, explicit_high].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(PlotError::InvalidConfiguration(format!(
                "color bound must be finite, got {}",
                bound
            )));
        }
    }

    if logarithmic {
        if let Some(negative) = finite(data).find(|v| *v < 0.0) {
            return Err(PlotError::InvalidScale { value: negative });
        }
    }

    let extent = present_extent(data);
    let data_extent = || {
        extent.ok_or_else(|| {
            PlotError::InvalidConfiguration(
                "no numeric values to derive the color range from".to_string(),
            )
        })
    };

    let (low, high) = match (divergent, explicit_low, explicit_high) {
        (true, Some(low), Some(high)) => {
            if high >= low.abs() {
                (-high, high)
            } else {
                (low, -low)
            }
        }
        (true, None, Some(high)) => (-high, high),
        (true, Some(low), None) => (low, -low),
        (true, None, None) => {
            let (data_min, data_max) = data_extent()?;
            if data_max >= data_min.abs() {
                (-data_max, data_max)
            } else {
                (data_min, -data_min)
            }
        }
        (false, low, high) => {
            let low = match low {
                Some(low) => low,
                None => data_extent()?.0,
            };
            let high = match high {
                Some(high) => high,
                None => data_extent()?.1,
            };
            (low, high)
        }
    };

    if low > high {
        return Err(PlotError::InvalidConfiguration(format!(
            "color range is inverted: low {} > high {}",
            low, high
        )));
    }

    debug!(low, high, divergent, logarithmic, "resolved color domain");

    Ok(ColorDomain {
        low,
        high,
        divergent,
        logarithmic,
    })
}

/// Legend descriptor: everything a color bar needs to draw itself
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorMapper {
    pub palette: Palette,
    pub low: f64,
    pub high: f64,
    pub logarithmic: bool,
    /// The 256-entry ramp, low to high
    pub ramp: Vec<String>,
    /// Smallest present data value (the color bar only spans the data)
    pub display_low: f64,
    /// Largest present data value
    pub display_high: f64,
    /// Log-space floor used when `low <= 0`
    pub log_floor: Option<f64>,
}

impl ColorMapper {
    /// Position of `value` along the bar (0.0 at `low`, 1.0 at `high`)
    pub fn position(&self, value: f64) -> f64 {
        normalize(value, self.low, self.high, self.logarithmic, self.log_floor)
    }
}

/// A resolved color scale for one plot call
#[derive(Clone, Debug)]
pub struct ColorScale {
    palette: Palette,
    domain: ColorDomain,
    ramp: Vec<String>,
    /// Smallest positive present value, the log-space floor when `low <= 0`
    log_floor: Option<f64>,
    display: (f64, f64),
}

impl ColorScale {
    /// Resolve a scale over a data series
    pub fn resolve(
        data: &[Option<f64>],
        palette: Palette,
        mode: ScaleMode,
        explicit_low: Option<f64>,
        explicit_high: Option<f64>,
    ) -> PlotResult<Self> {
        let domain = resolve_domain(
            data,
            palette.is_divergent(),
            mode.is_logarithmic(),
            explicit_low,
            explicit_high,
        )?;

        let log_floor = finite(data)
            .filter(|v| *v > 0.0)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));

        let display = present_extent(data).unwrap_or((domain.low, domain.high));

        Ok(Self {
            palette,
            domain,
            ramp: make_ramp(palette),
            log_floor,
            display,
        })
    }

    /// Resolve a scale over the values of a set of rows
    pub fn for_rows(
        rows: &[DataRow],
        palette: Palette,
        mode: ScaleMode,
        explicit_low: Option<f64>,
        explicit_high: Option<f64>,
    ) -> PlotResult<Self> {
        let values: Vec<Option<f64>> = rows.iter().map(DataRow::present_value).collect();
        Self::resolve(&values, palette, mode, explicit_low, explicit_high)
    }

    pub fn domain(&self) -> &ColorDomain {
        &self.domain
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn ramp(&self) -> &[String] {
        &self.ramp
    }

    /// Normalized position of a value within the domain, clamped to `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(
            value,
            self.domain.low,
            self.domain.high,
            self.domain.logarithmic,
            self.log_floor,
        )
        .clamp(0.0, 1.0)
    }

    /// Ramp index for a value
    pub fn ramp_index(&self, value: f64) -> usize {
        let t = self.normalize(value);
        ((t * RAMP_SIZE as f64) as usize).min(RAMP_SIZE - 1)
    }

    /// Color for a single present value
    pub fn color_for(&self, value: f64) -> &str {
        &self.ramp[self.ramp_index(value)]
    }

    /// One entry per value, `None` where the value is missing
    pub fn map_values(&self, data: &[Option<f64>]) -> Vec<Option<String>> {
        data.iter()
            .map(|v| {
                v.filter(|v| v.is_finite())
                    .map(|v| self.color_for(v).to_string())
            })
            .collect()
    }

    /// One entry per row, `None` where the row's value is missing
    pub fn map_rows(&self, rows: &[DataRow]) -> Vec<Option<String>> {
        rows.iter()
            .map(|r| r.present_value().map(|v| self.color_for(v).to_string()))
            .collect()
    }

    /// Legend descriptor for this scale
    pub fn mapper(&self) -> ColorMapper {
        ColorMapper {
            palette: self.palette,
            low: self.domain.low,
            high: self.domain.high,
            logarithmic: self.domain.logarithmic,
            ramp: self.ramp.clone(),
            display_low: self.display.0,
            display_high: self.display.1,
            log_floor: self.log_floor,
        }
    }
}

/// Unclamped normalization over `[low, high]`
///
/// A degenerate domain maps everything to 0. In log space values `<= 0`
/// map to the bottom of the scale.
fn normalize(value: f64, low: f64, high: f64, logarithmic: bool, log_floor: Option<f64>) -> f64 {
    if logarithmic {
        if value <= 0.0 {
            return 0.0;
        }
        let low = if low > 0.0 {
            low
        } else {
            match log_floor {
                Some(floor) => floor.min(high),
                None => return 0.0,
            }
        };
        if high <= low {
            return 0.0;
        }
        (value.ln() - low.ln()) / (high.ln() - low.ln())
    } else {
        if high <= low {
            return 0.0;
        }
        (value - low) / (high - low)
    }
}
