//! Plot orchestration
//!
//! Validates the configuration, resolves layout and color scale, runs the
//! assignment pass and assembles the [`Figure`].

use tracing::{debug, warn};

use crate::assign::{assign_colors, Assignment};
use crate::colorbar::ColorBar;
use crate::config::PlotConfig;
use crate::elements::ReferenceTable;
use crate::error::{PlotError, PlotResult};
use crate::figure::Figure;
use crate::layout::GridLayout;
use crate::scale::ColorScale;
use crate::types::DataRow;

/// Everything one plot call produced
#[derive(Clone, Debug)]
pub struct Plot {
    pub figure: Figure,
    pub assignment: Assignment,
    pub scale: ColorScale,
}

/// Plot rows on the standard periodic table
pub fn plot(rows: &[DataRow], config: &PlotConfig) -> PlotResult<Plot> {
    plot_with_reference(rows, config, ReferenceTable::standard())
}

/// Plot rows on a caller-supplied reference table
///
/// The reference is never modified; the layout works on its own copy.
pub fn plot_with_reference(
    rows: &[DataRow],
    config: &PlotConfig,
    reference: &ReferenceTable,
) -> PlotResult<Plot> {
    config.validate()?;

    let table = reference.for_layout(config.include_extended_rows);
    let layout = GridLayout::resolve(
        config.include_extended_rows,
        &config.excluded_groups,
        &config.excluded_periods,
        dimension("width", config.width)?,
        dimension("height", config.height)?,
        config.rescale_canvas,
    )?;

    let scale = ColorScale::for_rows(
        rows,
        config.palette,
        config.scale,
        config.lower_bound,
        config.upper_bound,
    )?;
    let resolved = scale.map_rows(rows);

    let assignment = assign_colors(rows, &table, &config.assign_options(), &resolved);
    if !assignment.warnings.is_empty() {
        warn!(
            "{} of {} rows were not plotted",
            assignment.warnings.len(),
            rows.len()
        );
    }

    let colorbar = ColorBar::new(scale.mapper(), config.colorbar.clone());
    let figure = Figure::build(&layout, &table, &assignment, rows, config, colorbar);
    debug!(cells = figure.cells.len(), "assembled figure");

    if let Some(path) = &config.output_path {
        figure.save(path)?;
    }

    Ok(Plot {
        figure,
        assignment,
        scale,
    })
}

fn dimension(option: &str, value: i64) -> PlotResult<u32> {
    u32::try_from(value).map_err(|_| {
        PlotError::InvalidConfiguration(format!("{} is out of range: {}", option, value))
    })
}
