//! Grid layout of the periodic table
//!
//! The grid is addressed by categorical factors: groups `"1"`..`"18"` along
//! x and periods `"1"`..`"7"` along y, plus `"blank"`, `"La"` and `"Ac"` rows
//! when the lanthanoids and actinoids are broken out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlotError, PlotResult};
use crate::types::{ElementRecord, GroupSlot, PeriodSlot};

/// Spacer row between period 7 and the broken-out rows
pub const BLANK_ROW: &str = "blank";

/// Resolved axes and canvas size
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Group factors, left to right
    pub groups: Vec<String>,
    /// Period factors, top to bottom
    pub periods: Vec<String>,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl GridLayout {
    /// Resolve the axes after removing excluded groups and periods
    ///
    /// Excluding a group or period that is not on its axis is an error.
    /// With `rescale`, the canvas shrinks with the number of remaining
    /// factors.
    pub fn resolve(
        extended: bool,
        excluded_groups: &[u8],
        excluded_periods: &[u8],
        width: u32,
        height: u32,
        rescale: bool,
    ) -> PlotResult<Self> {
        let mut groups: Vec<String> = (1..=18).map(|g: u8| g.to_string()).collect();
        let mut periods: Vec<String> = (1..=7).map(|p: u8| p.to_string()).collect();

        remove_factor(&mut groups, excluded_groups, "group")?;
        remove_factor(&mut periods, excluded_periods, "period")?;

        if extended {
            periods.push(BLANK_ROW.to_string());
            periods.push(PeriodSlot::Lanthanoid.to_string());
            periods.push(PeriodSlot::Actinoid.to_string());
        }

        let (width, height) = if rescale {
            (
                width * (groups.len() as u32 + 2) / 20,
                height * periods.len() as u32 / 10,
            )
        } else {
            (width, height)
        };

        debug!(
            groups = groups.len(),
            periods = periods.len(),
            width,
            height,
            "resolved grid layout"
        );

        Ok(Self {
            groups,
            periods,
            width,
            height,
        })
    }

    /// Column and row of an element, `None` when it is not on the grid
    pub fn place(&self, record: &ElementRecord) -> Option<(usize, usize)> {
        let group = match record.group {
            GroupSlot::Group(g) => g.to_string(),
            GroupSlot::None => return None,
        };
        let period = record.period.to_string();
        let column = self.groups.iter().position(|g| *g == group)?;
        let row = self.periods.iter().position(|p| *p == period)?;
        Some((column, row))
    }

    pub fn columns(&self) -> usize {
        self.groups.len()
    }

    pub fn rows(&self) -> usize {
        self.periods.len()
    }
}

fn remove_factor(factors: &mut Vec<String>, excluded: &[u8], kind: &str) -> PlotResult<()> {
    for value in excluded {
        let label = value.to_string();
        match factors.iter().position(|f| *f == label) {
            Some(index) => {
                factors.remove(index);
            }
            None => {
                return Err(PlotError::InvalidConfiguration(format!(
                    "cannot remove {} {}: not on the table",
                    kind, value
                )))
            }
        }
    }
    Ok(())
}

/// Text printed under a cell's symbol for its value
///
/// Missing values print nothing.
pub fn format_value(value: Option<f64>, decimals: usize, unit: Option<&str>) -> Option<String> {
    let value = value?;
    let mut text = format!("{:.*}", decimals, value);
    if let Some(unit) = unit {
        text.push_str(unit);
    }
    Some(text)
}
