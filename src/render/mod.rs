//! Rasterization of primitives and text.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: 1px non-antialiased lines for grid, curve and marker
//! - **Midpoint Circle**: Filled and outlined data point markers
//! - **Glyph outlines**: Anti-aliased text via `ab_glyph` coverage
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod text;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_hline, draw_line, draw_segment, draw_vline,
};
pub use text::{fit_scale, fit_text, Orientation, ScaleSteps, TextMetrics, Typeface, PX_PER_SCALE};
