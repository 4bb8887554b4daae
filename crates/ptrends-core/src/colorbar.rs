//! Color bar legend
//!
//! Tick placement for the legend that accompanies the table. Linear scales
//! get "nice" 1/2/5 x 10^n steps, logarithmic scales get one tick per decade.

use serde::{Deserialize, Serialize};

use crate::scale::ColorMapper;

/// Legend settings (position and typography are passed to the renderer)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBarConfig {
    /// Title drawn above the bar
    pub title: Option<String>,
    /// Desired number of major ticks
    pub ticks: usize,
    /// Bar height in pixels (defaults to the grid height)
    pub height: Option<i64>,
    /// Distance between tick labels and the bar
    pub standoff: u32,
    /// Tick label font size in points
    pub font_size: u32,
    /// Offset of the bar from its default position
    pub x: i32,
    pub y: i32,
}

impl Default for ColorBarConfig {
    fn default() -> Self {
        Self {
            title: None,
            ticks: 10,
            height: None,
            standoff: 12,
            font_size: 14,
            x: 0,
            y: 0,
        }
    }
}

/// A tick on the color bar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// Position in data coordinates
    pub value: f64,
    /// Position along the bar (0.0 at the domain's low end)
    pub normalized: f64,
    pub label: String,
}

/// The legend as handed to the renderer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorBar {
    pub mapper: ColorMapper,
    pub ticks: Vec<TickMark>,
    pub config: ColorBarConfig,
}

impl ColorBar {
    pub fn new(mapper: ColorMapper, config: ColorBarConfig) -> Self {
        let ticks = calculate_ticks(&mapper, config.ticks);
        Self {
            mapper,
            ticks,
            config,
        }
    }

    /// Portion of the bar that is drawn, as normalized `(start, end)`
    pub fn visible_span(&self) -> (f64, f64) {
        let start = self.mapper.position(self.mapper.display_low).clamp(0.0, 1.0);
        let end = self.mapper.position(self.mapper.display_high).clamp(0.0, 1.0);
        (start, end)
    }
}

/// Ticks within the displayed data span of a mapper
pub fn calculate_ticks(mapper: &ColorMapper, desired: usize) -> Vec<TickMark> {
    let (min, max) = (mapper.display_low, mapper.display_high);
    let values = if mapper.logarithmic {
        log_tick_values(min, max)
    } else {
        linear_tick_values(min, max, desired)
    };

    values
        .into_iter()
        .map(|value| TickMark {
            value,
            normalized: mapper.position(value),
            label: format_number(value),
        })
        .collect()
}

fn linear_tick_values(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let range = max - min;
    if range <= 0.0 || desired == 0 {
        return if range == 0.0 { vec![min] } else { vec![] };
    }

    // Calculate nice tick spacing
    let rough_step = range / desired as f64;
    let magnitude = 10.0_f64.powf(rough_step.abs().log10().floor());
    let residual = rough_step / magnitude;

    let nice_step = if residual <= 1.5 {
        1.0 * magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let start = (min / nice_step).ceil();
    let end = (max / nice_step + 1e-9).floor();
    let mut values = Vec::new();
    let mut k = start;
    while k <= end {
        // Multiplying the step index avoids accumulating error
        let value = k * nice_step;
        values.push(if value.abs() < nice_step * 1e-9 { 0.0 } else { value });
        k += 1.0;
    }
    values
}

fn log_tick_values(min: f64, max: f64) -> Vec<f64> {
    if min <= 0.0 && max <= 0.0 {
        return vec![];
    }
    let min = if min > 0.0 { min } else { max.min(1.0) };

    let start_decade = min.log10().floor() as i32;
    let end_decade = max.log10().ceil() as i32;

    (start_decade..=end_decade)
        .map(|decade| 10.0_f64.powi(decade))
        .filter(|value| *value >= min * (1.0 - 1e-9) && *value <= max * (1.0 + 1e-9))
        .collect()
}

/// Format a tick value for display
fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 10000.0 || value.abs() < 0.01 {
        format!("{:.2e}", value)
    } else if value.fract().abs() < 1e-10 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::{make_ramp, Palette};

    fn mapper(low: f64, high: f64, logarithmic: bool) -> ColorMapper {
        ColorMapper {
            palette: Palette::Plasma,
            low,
            high,
            logarithmic,
            ramp: make_ramp(Palette::Plasma),
            display_low: low,
            display_high: high,
            log_floor: None,
        }
    }

    #[test]
    fn test_linear_ticks() {
        let ticks = calculate_ticks(&mapper(0.0, 100.0, false), 5);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks[0].normalized, 0.0);
        assert_eq!(ticks[5].normalized, 1.0);
        assert_eq!(ticks[1].label, "20");
    }

    #[test]
    fn test_ticks_stay_inside_span() {
        let ticks = calculate_ticks(&mapper(5.4, 24.6, false), 10);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.value >= 5.4 && t.value <= 24.6));
    }

    #[test]
    fn test_symmetric_ticks_include_zero() {
        let ticks = calculate_ticks(&mapper(-7.0, 7.0, false), 10);
        assert!(ticks.iter().any(|t| t.value == 0.0 && t.label == "0"));
    }

    #[test]
    fn test_log_ticks() {
        let ticks = calculate_ticks(&mapper(1.0, 1000.0, true), 10);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_log_ticks_with_zero_in_data() {
        let mut m = mapper(0.0, 100.0, true);
        m.log_floor = Some(1.0);
        let ticks = calculate_ticks(&m, 10);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1.0, 10.0, 100.0]);
        assert_eq!(ticks[2].normalized, 1.0);
    }

    #[test]
    fn test_degenerate_span() {
        let ticks = calculate_ticks(&mapper(3.0, 3.0, false), 10);
        assert_eq!(ticks.len(), 1);
    }

    #[test]
    fn test_visible_span_follows_data() {
        let mut m = mapper(-10.0, 10.0, false);
        m.display_low = 0.0;
        m.display_high = 5.0;
        let bar = ColorBar::new(m, ColorBarConfig::default());
        let (start, end) = bar.visible_span();
        assert!((start - 0.5).abs() < 1e-12);
        assert!((end - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(12345.0), "1.23e4");
    }
}
