//! ptrends-core - Periodic-table heatmaps
//!
//! Maps per-element scalar values onto a color scale and lays the result
//! out as a periodic table with a color-bar legend.
//!
//! # Key Components
//!
//! - **ColorScale**: domain resolution (linear or log, diverging palettes
//!   kept symmetric around zero) and value-to-color mapping
//! - **assign_colors**: case-insensitive element matching with duplicate and
//!   unknown-symbol detection plus blank, threshold and highlight overrides
//! - **GridLayout**: group/period axes with optional lanthanoid and actinoid rows
//! - **Figure**: the laid-out plot, exportable as SVG
//! - **plot**: runs the whole pipeline from a [`PlotConfig`]

pub mod assign;
pub mod colorbar;
pub mod colormap;
pub mod config;
pub mod elements;
pub mod error;
pub mod figure;
pub mod layout;
pub mod plot;
pub mod scale;
pub mod types;

pub use assign::{assign_colors, AssignOptions, Assignment, Threshold};
pub use colorbar::{calculate_ticks, ColorBar, ColorBarConfig, TickMark};
pub use colormap::{classify_palette, make_ramp, Color, Colormap, Palette, UnknownPalette};
pub use config::PlotConfig;
pub use elements::ReferenceTable;
pub use error::{PlotError, PlotResult, PlotWarning};
pub use figure::{Figure, PlacedCell};
pub use layout::{format_value, GridLayout};
pub use plot::{plot, plot_with_reference, Plot};
pub use scale::{resolve_domain, ColorDomain, ColorMapper, ColorScale, ScaleMode};
pub use types::*;
