//! Color scale integration tests
//!
//! Domain resolution and ramp mapping, with property-based checks

use proptest::prelude::*;
use ptrends_core::colormap::RAMP_SIZE;
use ptrends_core::{make_ramp, resolve_domain, ColorScale, Palette, PlotError, ScaleMode};

fn present(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

// === Example Scenarios ===

#[test]
fn test_sequential_example() {
    let data = present(&[13.6, 24.6, 5.4]);
    let scale = ColorScale::resolve(&data, Palette::Viridis, ScaleMode::Linear, None, None).unwrap();
    assert_eq!(scale.domain().low, 5.4);
    assert_eq!(scale.domain().high, 24.6);

    let positions: Vec<f64> = [13.6, 24.6, 5.4].iter().map(|v| scale.normalize(*v)).collect();
    assert!((positions[0] - (13.6 - 5.4) / (24.6 - 5.4)).abs() < 1e-12);
    assert_eq!(positions[1], 1.0);
    assert_eq!(positions[2], 0.0);

    let mapper = scale.mapper();
    assert_eq!((mapper.low, mapper.high), (5.4, 24.6));
}

#[test]
fn test_divergent_example() {
    let domain = resolve_domain(&present(&[-3.0, 7.0]), true, false, None, None).unwrap();
    assert_eq!((domain.low, domain.high), (-7.0, 7.0));
}

#[test]
fn test_every_diverging_palette_is_symmetric() {
    for palette in Palette::ALL.iter().filter(|p| p.is_divergent()) {
        let scale =
            ColorScale::resolve(&present(&[-1.0, 4.0]), *palette, ScaleMode::Linear, None, None)
                .unwrap();
        assert_eq!(scale.domain().low, -scale.domain().high, "{}", palette);
    }
}

#[test]
fn test_log_scale_error_reports_value() {
    let err = ColorScale::resolve(
        &present(&[10.0, -4.0]),
        Palette::Plasma,
        ScaleMode::Log,
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::InvalidScale { value } if value == -4.0));
    assert!(err.to_string().contains("-4"));
}

#[test]
fn test_log_scale_spreads_decades() {
    let data = present(&[1.0, 10.0, 100.0]);
    let scale = ColorScale::resolve(&data, Palette::Plasma, ScaleMode::Log, None, None).unwrap();
    assert_eq!(scale.ramp_index(1.0), 0);
    assert_eq!(scale.ramp_index(100.0), RAMP_SIZE - 1);
    let middle = scale.ramp_index(10.0);
    assert!(middle == RAMP_SIZE / 2 || middle == RAMP_SIZE / 2 - 1);
}

// === Property-Based Tests ===

proptest! {
    #[test]
    fn test_sequential_domain_is_data_extent(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)
    ) {
        let domain = resolve_domain(&present(&values), false, false, None, None).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(domain.low, min);
        prop_assert_eq!(domain.high, max);
    }

    #[test]
    fn test_divergent_domain_is_symmetric(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)
    ) {
        let domain = resolve_domain(&present(&values), true, false, None, None).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(domain.low, -domain.high);
        prop_assert_eq!(domain.high, max.max(min.abs()));
    }

    #[test]
    fn test_log_scale_rejects_any_negative(
        values in prop::collection::vec(0.0f64..1.0e6, 0..20),
        negative in -1.0e6f64..-1.0e-6,
        position in 0usize..20,
    ) {
        let mut data = present(&values);
        data.insert(position.min(data.len()), Some(negative));
        let result = ColorScale::resolve(&data, Palette::Plasma, ScaleMode::Log, None, None);
        let is_invalid_scale = matches!(result, Err(PlotError::InvalidScale { .. }));
        prop_assert!(is_invalid_scale);
    }

    #[test]
    fn test_log_scale_rejects_negative_whatever_the_bounds(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 0..20),
        negative in -1.0e6f64..-1.0e-6,
        low in prop::option::of(-1.0e6f64..1.0e6),
        high in prop::option::of(-1.0e6f64..1.0e6),
        palette in prop::sample::select(Palette::ALL.to_vec()),
    ) {
        let mut data = present(&values);
        data.push(Some(negative));
        let result = ColorScale::resolve(&data, palette, ScaleMode::Log, low, high);
        let is_invalid_scale = matches!(result, Err(PlotError::InvalidScale { .. }));
        prop_assert!(is_invalid_scale);
    }

    #[test]
    fn test_log_scale_equal_values_share_a_color(
        values in prop::collection::vec(0.0f64..1.0e6, 1..20),
        repeat in 0usize..20,
    ) {
        let mut data = present(&values);
        data.push(data[repeat % values.len()]);
        let scale = ColorScale::resolve(&data, Palette::Magma, ScaleMode::Log, None, None).unwrap();
        let colors = scale.map_values(&data);
        prop_assert_eq!(&colors[repeat % values.len()], &colors[data.len() - 1]);
    }

    #[test]
    fn test_colors_always_come_from_the_ramp(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 1..20),
        value in -1.0e4f64..1.0e4,
    ) {
        let scale =
            ColorScale::resolve(&present(&values), Palette::RdBu, ScaleMode::Linear, None, None)
                .unwrap();
        let color = scale.color_for(value);
        prop_assert!(scale.ramp().iter().any(|c| c == color));
    }
}

#[test]
fn test_ramps_are_deterministic() {
    for palette in Palette::ALL {
        let first = make_ramp(palette);
        let second = make_ramp(palette);
        assert_eq!(first.len(), RAMP_SIZE);
        assert_eq!(first, second, "{}", palette);
    }
}
