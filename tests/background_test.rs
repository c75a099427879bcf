//! Background composition: determinism, curve breaks and configuration errors.
//!
//! Run: cargo test --test background_test

#![allow(clippy::unwrap_used)]

use livegraph::prelude::*;
use livegraph::graph::{compose, curve_runs};
use livegraph::render::Typeface;
use proptest::prelude::*;
use std::fmt;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> DataSeries {
    DataSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 4.0, 10.0, 15.0, 23.0]).unwrap()
}

/// Constant 10 except on `[2, 3]`, where it jumps far above the plot.
struct Gap;

impl CurveEvaluator for Gap {
    fn predict(&self, x: f64) -> f64 {
        if (2.0..=3.0).contains(&x) {
            1000.0
        } else {
            10.0
        }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = gap")
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_identical_canvas() {
    init_logging();
    let face = Typeface::embedded().unwrap();
    let series = sample();
    let curve = PolynomialFit::fit(&series, LineType::QUADRATIC).unwrap();

    for theme in GraphTheme::ALL {
        let style = GraphStyle::from_theme(theme);
        let a = compose(&series, &style, &curve, &CanvasLayout::default(), &face).unwrap();
        let b = compose(&series, &style, &curve, &CanvasLayout::default(), &face).unwrap();
        assert_eq!(a.canvas(), b.canvas(), "theme {theme:?} is not deterministic");
    }
}

#[test]
fn test_graph_background_matches_compose() {
    init_logging();
    let face = Typeface::embedded().unwrap();
    let series = sample();
    let curve = PolynomialFit::fit(&series, 2).unwrap();
    let style = GraphStyle::default();

    let direct = compose(&series, &style, &curve, &CanvasLayout::default(), &face).unwrap();
    let graph = create_graph("bg", style, series, &curve, &NullServer).unwrap();
    assert_eq!(graph.background(), direct.canvas());
}

// ============================================================================
// Curve polyline
// ============================================================================

#[test]
fn test_curve_breaks_over_out_of_range_interval() {
    init_logging();
    let face = Typeface::embedded().unwrap();
    let style = GraphStyle::default().with_point_radius(0);
    let bg = compose(&sample(), &style, &Gap, &CanvasLayout::default(), &face).unwrap();
    let mapper = bg.mapper();

    let runs = curve_runs(&Gap, mapper, 50);
    assert_eq!(runs.len(), 2);

    let (x2, _) = mapper.to_pixel(2.0, 0.0).round();
    let (x3, _) = mapper.to_pixel(3.0, 0.0).round();
    let (x4, _) = mapper.to_pixel(4.0, 0.0).round();

    let inside_gap = bg.canvas().count_color_in_columns(x2 as u32 + 2, x3 as u32 - 1, style.line);
    assert_eq!(inside_gap, 0, "curve drawn across the out-of-range interval");

    let after_gap = bg.canvas().count_color_in_columns(x3 as u32 + 2, x4 as u32, style.line);
    assert!(after_gap > 0, "curve did not resume after the interval");
}

#[test]
fn test_curve_entirely_out_of_range_draws_nothing() {
    let face = Typeface::embedded().unwrap();
    let style = GraphStyle::default().with_point_radius(0);
    let far = PolynomialFit::from_coefficients(vec![1.0e6]);
    let bg = compose(&sample(), &style, &far, &CanvasLayout::default(), &face).unwrap();

    assert!(curve_runs(&far, bg.mapper(), 50).is_empty());
    assert_eq!(bg.canvas().count_color_in_columns(32, 319, style.line), 0);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_mismatched_series_rejected() {
    let err = DataSeries::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_empty_series_rejected() {
    let err = DataSeries::new(Vec::new(), Vec::new()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_zero_fps_creates_no_graph() {
    init_logging();
    let (server, frames) = ChannelServer::new();
    let series = sample();
    let curve = PolynomialFit::fit(&series, 1).unwrap();
    let style = GraphStyle::default().with_fps(0);

    let err = create_graph("bad", style, series, &curve, &server).unwrap_err();
    assert!(matches!(err, Error::InvalidFrameRate(0)));
    drop(server);
    assert!(frames.recv().is_err());
}

#[test]
fn test_zero_fps_style_file_rejected() {
    let err = GraphStyle::parse("theme: dark\nfps: 0\n").unwrap_err();
    assert!(err.is_configuration());
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_compose_valid_for_any_series(
        points in prop::collection::vec((-1.0e4f64..1.0e4, -1.0e4f64..1.0e4), 1..12),
        degree in 0usize..3,
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let series = DataSeries::new(x, y).unwrap();
        let curve = PolynomialFit::fit(&series, degree.min(series.len() - 1))
            .unwrap_or_else(|_| PolynomialFit::from_coefficients(vec![0.0]));
        let face = Typeface::embedded().unwrap();
        let style = GraphStyle::default();

        let a = compose(&series, &style, &curve, &CanvasLayout::default(), &face).unwrap();
        let b = compose(&series, &style, &curve, &CanvasLayout::default(), &face).unwrap();

        prop_assert!(a.mapper().x_range().max > a.mapper().x_range().min);
        prop_assert!(a.mapper().y_range().max > a.mapper().y_range().min);
        prop_assert_eq!(a.canvas(), b.canvas());
    }
}
