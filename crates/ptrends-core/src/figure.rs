//! Figure assembly and SVG output
//!
//! A [`Figure`] is the finished, renderer-independent description of a plot:
//! placed cells with their fills and labels plus the color bar. It can be
//! written out as a standalone SVG document.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::assign::Assignment;
use crate::colorbar::ColorBar;
use crate::config::PlotConfig;
use crate::elements::ReferenceTable;
use crate::error::PlotResult;
use crate::layout::{format_value, GridLayout};
use crate::types::{DataRow, SourceKind};

/// Space around the grid
const MARGIN: f64 = 30.0;
/// Horizontal room reserved right of the grid for the color bar
const COLORBAR_BAND: f64 = 110.0;
const COLORBAR_WIDTH: f64 = 18.0;
/// Extra top margin when a title is drawn
const TITLE_HEIGHT: f64 = 30.0;

/// One element cell on the canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedCell {
    pub symbol: String,
    pub atomic_number: u32,
    /// Grid column and row
    pub column: usize,
    pub row: usize,
    /// Top-left corner and size in pixels
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub source: SourceKind,
    /// Value printed under the symbol
    pub value_text: Option<String>,
}

/// A fully laid out plot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    /// Cell fill opacity
    pub alpha: f64,
    pub layout: GridLayout,
    pub cells: Vec<PlacedCell>,
    pub colorbar: ColorBar,
}

impl Figure {
    /// Lay out every reference element that fits on the grid
    pub fn build(
        layout: &GridLayout,
        reference: &ReferenceTable,
        assignment: &Assignment,
        rows: &[DataRow],
        config: &PlotConfig,
        colorbar: ColorBar,
    ) -> Self {
        let width = layout.width as f64;
        let height = layout.height as f64;
        let top = MARGIN + if config.title.is_some() { TITLE_HEIGHT } else { 0.0 };
        let grid_width = (width - COLORBAR_BAND - 2.0 * MARGIN).max(0.0);
        let grid_height = (height - top - MARGIN).max(0.0);
        let cell_width = grid_width / layout.columns().max(1) as f64;
        let cell_height = grid_height / layout.rows().max(1) as f64;

        let claims = assignment.claiming_rows();
        let unit = config.value_unit_suffix.as_deref();

        let cells = reference
            .records()
            .iter()
            .zip(&assignment.cells)
            .zip(claims)
            .filter_map(|((record, cell), claim)| {
                let (column, row) = layout.place(record)?;
                let value_text = if config.print_values_on_cells {
                    claim
                        .and_then(|i| rows.get(i))
                        .and_then(|r| format_value(r.present_value(), config.value_decimal_places, unit))
                } else {
                    None
                };
                Some(PlacedCell {
                    symbol: record.symbol.clone(),
                    atomic_number: record.atomic_number,
                    column,
                    row,
                    x: MARGIN + column as f64 * cell_width,
                    y: top + row as f64 * cell_height,
                    width: cell_width,
                    height: cell_height,
                    color: cell.color.clone(),
                    source: cell.source,
                    value_text,
                })
            })
            .collect();

        Self {
            width: layout.width,
            height: layout.height,
            title: config.title.clone(),
            alpha: config.alpha,
            layout: layout.clone(),
            cells,
            colorbar,
        }
    }

    /// Cell for a symbol (exact casing)
    pub fn cell(&self, symbol: &str) -> Option<&PlacedCell> {
        self.cells.iter().find(|c| c.symbol == symbol)
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="white"/>"#
        );

        if let Some(title) = &self.title {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="18" font-weight="bold">{}</text>"#,
                self.width as f64 / 2.0,
                MARGIN,
                escape_xml(title)
            );
        }

        for cell in &self.cells {
            self.write_cell(&mut svg, cell);
        }
        self.write_colorbar(&mut svg);

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG document to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg())?;
        info!("Wrote figure to {}", path.display());
        Ok(())
    }

    fn write_cell(&self, svg: &mut String, cell: &PlacedCell) {
        let cx = cell.x + cell.width / 2.0;
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{}" stroke="white" stroke-width="1"/>"#,
            cell.x, cell.y, cell.width, cell.height, cell.color, self.alpha
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="8">{}</text>"#,
            cell.x + 3.0,
            cell.y + 10.0,
            cell.atomic_number
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="13" font-weight="bold">{}</text>"#,
            cx,
            cell.y + cell.height * 0.6,
            escape_xml(&cell.symbol)
        );
        if let Some(text) = &cell.value_text {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="8">{}</text>"#,
                cx,
                cell.y + cell.height - 4.0,
                escape_xml(text)
            );
        }
    }

    fn write_colorbar(&self, svg: &mut String) {
        let bar = &self.colorbar;
        let config = &bar.config;
        let ramp = &bar.mapper.ramp;
        if ramp.is_empty() {
            return;
        }

        let top = MARGIN + if self.title.is_some() { TITLE_HEIGHT } else { 0.0 };
        let x = self.width as f64 - COLORBAR_BAND + 20.0 + config.x as f64;
        let y = top + config.y as f64;
        let height = match config.height {
            Some(h) => h as f64,
            None => (self.height as f64 - top - MARGIN).max(0.0),
        };

        let (start, end) = bar.visible_span();
        let span = end - start;
        let first = ((start * ramp.len() as f64) as usize).min(ramp.len() - 1);
        let last = ((end * ramp.len() as f64) as usize).min(ramp.len() - 1);
        let slices = last - first + 1;
        let slice_height = height / slices as f64;

        svg.push_str("<g class=\"colorbar\">\n");
        if let Some(title) = &config.title {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{}">{}</text>"#,
                x,
                y - 8.0,
                config.font_size,
                escape_xml(title)
            );
        }
        // High values on top
        for (k, color) in ramp[first..=last].iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<rect x="{:.2}" y="{:.2}" width="{}" height="{:.2}" fill="{}" fill-opacity="{}"/>"#,
                x,
                y + height - (k + 1) as f64 * slice_height,
                COLORBAR_WIDTH,
                slice_height,
                color,
                self.alpha
            );
        }
        for tick in &bar.ticks {
            let offset = if span > 0.0 {
                (tick.normalized - start) / span
            } else {
                0.5
            };
            let ty = y + height * (1.0 - offset);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{ty:.2}" x2="{:.2}" y2="{ty:.2}" stroke="black"/>"#,
                x + COLORBAR_WIDTH,
                x + COLORBAR_WIDTH + 4.0,
                ty = ty
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{}" dominant-baseline="middle">{}</text>"#,
                x + COLORBAR_WIDTH + config.standoff as f64,
                ty,
                config.font_size,
                escape_xml(&tick.label)
            );
        }
        svg.push_str("</g>\n");
    }
}

/// Escape text for use inside SVG elements
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
