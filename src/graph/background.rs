//! One-time composition of the static background canvas.
//!
//! Drawing order: fill, grid, tick labels, data points, fitted curve,
//! equation caption. Every step is a pure function of its inputs, so equal
//! inputs always produce pixel-identical canvases.

use super::layout::CanvasLayout;
use crate::curve::CurveEvaluator;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::render::{
    draw_circle, draw_circle_outline, draw_hline, draw_segment, draw_vline, fit_scale, fit_text, Orientation,
    TextMetrics, Typeface,
};
use crate::scale::{AxisRange, CoordinateMapper};
use crate::series::DataSeries;
use crate::style::{GraphStyle, PointMarker};
use std::sync::Arc;

/// Upper bound on curve samples, whatever the layout asks for.
const MAX_CURVE_SAMPLES: u64 = 1 << 20;

/// The composed canvas together with the mapping used to draw it.
#[derive(Debug, Clone)]
pub struct Background {
    canvas: Arc<Framebuffer>,
    mapper: CoordinateMapper,
}

impl Background {
    /// The composed canvas.
    #[must_use]
    pub fn canvas(&self) -> &Framebuffer {
        &self.canvas
    }

    /// Shared handle to the canvas.
    #[must_use]
    pub fn shared(&self) -> Arc<Framebuffer> {
        Arc::clone(&self.canvas)
    }

    /// Mapping from data space to canvas pixels.
    #[must_use]
    pub const fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }
}

/// Padded x and y ranges of `series` for `layout`.
#[must_use]
pub fn padded_ranges(series: &DataSeries, layout: &CanvasLayout) -> (AxisRange, AxisRange) {
    // DataSeries is never empty, so padding always yields a range.
    let fallback = AxisRange { min: -1.0, max: 1.0, step: 1.0 };
    let x = AxisRange::padded(series.x(), layout.x_divisions).unwrap_or(fallback);
    let y = AxisRange::padded(series.y(), layout.y_divisions).unwrap_or(fallback);
    (x, y)
}

/// Compose the background canvas.
///
/// # Errors
///
/// Returns a configuration error if `style` or `layout` is invalid.
pub fn compose<C: CurveEvaluator + ?Sized>(
    series: &DataSeries,
    style: &GraphStyle,
    curve: &C,
    layout: &CanvasLayout,
    typeface: &Typeface,
) -> Result<Background> {
    style.validate()?;
    layout.validate()?;

    let (x_range, y_range) = padded_ranges(series, layout);
    let mapper = CoordinateMapper::new(x_range, y_range, layout.plot);

    let mut fb = Framebuffer::filled(layout.width, layout.height, style.background)?;

    draw_grid(&mut fb, &mapper, style);
    draw_tick_labels(&mut fb, &mapper, style, layout, typeface);
    draw_points(&mut fb, &mapper, series, style);
    draw_curve(&mut fb, &mapper, curve, style, layout);
    draw_caption(&mut fb, &curve.to_string(), style, layout, typeface);

    Ok(Background { canvas: Arc::new(fb), mapper })
}

// ============================================================================
// Grid and labels
// ============================================================================

/// Pixel offset of grid line `index` out of `cells` along a span.
fn grid_offset(start: f64, length: f64, index: u32, cells: u32) -> f64 {
    start + length * f64::from(index) / f64::from(cells.max(1))
}

fn draw_grid(fb: &mut Framebuffer, mapper: &CoordinateMapper, style: &GraphStyle) {
    let plot = mapper.plot();
    let top = plot.top().round() as i32;
    let bottom = plot.bottom().round() as i32;
    let left = plot.left().round() as i32;
    let right = plot.right().round() as i32;

    let x_cells = mapper.x_range().cell_count();
    for i in 0..=x_cells {
        let x = grid_offset(plot.left(), plot.width, i, x_cells).round() as i32;
        draw_vline(fb, x, top, bottom, style.grid_line);
    }

    let y_cells = mapper.y_range().cell_count();
    for i in 0..=y_cells {
        let y = grid_offset(plot.bottom(), -plot.height, i, y_cells).round() as i32;
        draw_hline(fb, left, right, y, style.grid_line);
    }
}

fn draw_tick_labels(
    fb: &mut Framebuffer,
    mapper: &CoordinateMapper,
    style: &GraphStyle,
    layout: &CanvasLayout,
    typeface: &Typeface,
) {
    let plot = mapper.plot();
    let scale = layout.label_scale;
    let ascent = typeface.ascent(scale);

    // X labels read bottom to top, ending just below the plot.
    let x_range = mapper.x_range();
    let x_cells = x_range.cell_count();
    for i in 0..=x_cells {
        let text = fit_text(typeface, &x_range.tick(i).to_string(), layout.label_budget, scale);
        let width = typeface.text_width(&text, scale);
        let x = grid_offset(plot.left(), plot.width, i, x_cells);
        let origin = (x + ascent / 2.0, plot.bottom() + 2.0 + width);
        typeface.draw(fb, &text, origin, scale, style.label, Orientation::RotatedCcw);
    }

    // Y labels are right-aligned against the left edge of the plot.
    let y_range = mapper.y_range();
    let y_cells = y_range.cell_count();
    let max_baseline = f64::from(layout.height);
    for i in 0..=y_cells {
        let text = fit_text(typeface, &y_range.tick(i).to_string(), layout.label_budget, scale);
        let width = typeface.text_width(&text, scale);
        let y = grid_offset(plot.bottom(), -plot.height, i, y_cells);
        let baseline = (y + ascent / 2.0).clamp(ascent, max_baseline);
        let origin = (plot.left() - 1.0 - width, baseline);
        typeface.draw(fb, &text, origin, scale, style.label, Orientation::Horizontal);
    }
}

// ============================================================================
// Data
// ============================================================================

fn draw_points(fb: &mut Framebuffer, mapper: &CoordinateMapper, series: &DataSeries, style: &GraphStyle) {
    if style.point_radius == 0 {
        return;
    }
    let radius = i32::try_from(style.point_radius).unwrap_or(i32::MAX);
    let draw = match style.point_marker {
        PointMarker::Outline => draw_circle_outline,
        PointMarker::Filled => draw_circle,
    };
    for (x, y) in series.points() {
        let (cx, cy) = mapper.to_pixel(x, y).round();
        draw(fb, cx, cy, radius, style.line);
    }
}

/// Sample `curve` across the padded x range and split the mapped samples into
/// runs of consecutive points strictly inside the y range.
///
/// A sample outside the y range (or non-finite) ends the current run, so no
/// segment is ever drawn across an out-of-range stretch.
#[must_use]
pub fn curve_runs<C: CurveEvaluator + ?Sized>(
    curve: &C,
    mapper: &CoordinateMapper,
    samples_per_cell: u32,
) -> Vec<Vec<Point>> {
    let x_range = mapper.x_range();
    let y_range = mapper.y_range();
    let dx = x_range.step / f64::from(samples_per_cell.max(1));
    let count = ((x_range.span() / dx).ceil() as u64).min(MAX_CURVE_SAMPLES);

    let mut runs = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for i in 0..=count {
        let x = (x_range.min + dx * i as f64).min(x_range.max);
        let y = curve.predict(x);
        if y_range.contains_open(y) {
            current.push(mapper.to_pixel(x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn draw_curve<C: CurveEvaluator + ?Sized>(
    fb: &mut Framebuffer,
    mapper: &CoordinateMapper,
    curve: &C,
    style: &GraphStyle,
    layout: &CanvasLayout,
) {
    for run in curve_runs(curve, mapper, layout.samples_per_cell) {
        for pair in run.windows(2) {
            draw_segment(fb, pair[0], pair[1], style.line);
        }
    }
}

fn draw_caption(
    fb: &mut Framebuffer,
    caption: &str,
    style: &GraphStyle,
    layout: &CanvasLayout,
    typeface: &Typeface,
) {
    let scale = fit_scale(typeface, caption, f64::from(layout.width), layout.caption);
    let baseline = f64::from(layout.height) - layout.caption_inset;
    typeface.draw(fb, caption, (0.0, baseline), scale, style.equation, Orientation::Horizontal);
}
