//! Text measurement, fitting and rasterization.
//!
//! Text sizes are expressed as a unitless *scale*; one unit of scale is
//! [`PX_PER_SCALE`] pixels of em height. The fitting helpers are pure
//! functions over a [`TextMetrics`] implementation so they can be exercised
//! without a rasterizer.

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use ab_glyph::{point, Font, FontRef, GlyphId, ScaleFont};

/// Em height in pixels for a scale of 1.0.
pub const PX_PER_SCALE: f64 = 30.0;

/// Width measurement of rendered text.
pub trait TextMetrics {
    /// Rendered width of `content` at `scale`, in pixels.
    fn text_width(&self, content: &str, scale: f64) -> f64;
}

/// Drop trailing characters of `content` until its width at `scale` fits
/// within `budget` pixels. May return an empty string.
#[must_use]
pub fn fit_text<M: TextMetrics + ?Sized>(
    metrics: &M,
    content: &str,
    budget: f64,
    scale: f64,
) -> String {
    let mut text = content.to_string();
    while !text.is_empty() && metrics.text_width(&text, scale) > budget {
        text.pop();
    }
    text
}

/// Iterative scale shrink parameters for [`fit_scale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSteps {
    /// Scale to try first.
    pub start: f64,
    /// Decrement applied per attempt.
    pub step: f64,
    /// Smallest scale ever returned.
    pub floor: f64,
}

impl Default for ScaleSteps {
    fn default() -> Self {
        Self { start: 0.4, step: 0.05, floor: 0.05 }
    }
}

/// Largest scale on the `steps` ladder at which `content` fits within
/// `max_width`, or the floor when nothing fits.
#[must_use]
pub fn fit_scale<M: TextMetrics + ?Sized>(
    metrics: &M,
    content: &str,
    max_width: f64,
    steps: ScaleSteps,
) -> f64 {
    if steps.step <= 0.0 || steps.start <= steps.floor {
        return steps.start.max(steps.floor);
    }

    // Count rungs instead of accumulating so the ladder is exact.
    let rungs = ((steps.start - steps.floor) / steps.step + 1e-9).floor() as u32;
    for rung in 0..=rungs {
        let scale = steps.start - steps.step * f64::from(rung);
        if metrics.text_width(content, scale) <= max_width {
            return scale;
        }
    }
    steps.floor
}

/// Direction text runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left to right, baseline horizontal.
    #[default]
    Horizontal,
    /// Bottom to top: horizontal text rotated 90° counter-clockwise.
    RotatedCcw,
}

/// Embedded monospace typeface used for all labels.
#[derive(Debug, Clone)]
pub struct Typeface {
    font: FontRef<'static>,
}

impl Typeface {
    /// Load the embedded typeface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Font`] if the font data cannot be parsed.
    pub fn embedded() -> Result<Self> {
        let font = FontRef::try_from_slice(epaint_default_fonts::HACK_REGULAR)
            .map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self { font })
    }

    fn px(scale: f64) -> f32 {
        (scale * PX_PER_SCALE) as f32
    }

    /// Height above the baseline of the tallest glyphs, in pixels.
    #[must_use]
    pub fn ascent(&self, scale: f64) -> f64 {
        f64::from(self.font.as_scaled(Self::px(scale)).ascent())
    }

    /// Draw `content` with its baseline starting at `(x, y)`.
    ///
    /// For [`Orientation::RotatedCcw`] the text runs upwards from `(x, y)`
    /// and its glyph tops point left. Pixels outside the canvas are dropped.
    pub fn draw(
        &self,
        fb: &mut Framebuffer,
        content: &str,
        (x, y): (f64, f64),
        scale: f64,
        color: Rgb,
        orientation: Orientation,
    ) {
        let px = Self::px(scale);
        if px <= 0.0 {
            return;
        }
        let scaled = self.font.as_scaled(px);

        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for c in content.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(px, point(caret, 0.0));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    // Glyph-local offsets from the baseline origin.
                    let dx = f64::from(bounds.min.x) + f64::from(gx);
                    let dy = f64::from(bounds.min.y) + f64::from(gy);
                    let (tx, ty) = match orientation {
                        Orientation::Horizontal => (x + dx, y + dy),
                        Orientation::RotatedCcw => (x + dy, y - dx),
                    };
                    if tx >= 0.0 && ty >= 0.0 {
                        fb.blend_pixel(tx as u32, ty as u32, color, coverage);
                    }
                });
            }

            caret += scaled.h_advance(id);
            previous = Some(id);
        }
    }
}

impl TextMetrics for Typeface {
    fn text_width(&self, content: &str, scale: f64) -> f64 {
        let scaled = self.font.as_scaled(Self::px(scale));
        let mut width = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for c in content.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        f64::from(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Fixed-pitch metrics: every character is `10 * scale` pixels wide.
    struct Fixed;

    impl TextMetrics for Fixed {
        fn text_width(&self, content: &str, scale: f64) -> f64 {
            content.chars().count() as f64 * 10.0 * scale
        }
    }

    #[test]
    fn test_fit_text_truncates_from_the_end() {
        assert_eq!(fit_text(&Fixed, "-0.5714285", 30.0, 1.0), "-0.");
        assert_eq!(fit_text(&Fixed, "12", 30.0, 1.0), "12");
    }

    #[test]
    fn test_fit_text_may_empty() {
        assert_eq!(fit_text(&Fixed, "123", 5.0, 1.0), "");
    }

    #[test]
    fn test_fit_scale_keeps_start_when_it_fits() {
        let scale = fit_scale(&Fixed, "abc", 320.0, ScaleSteps::default());
        assert_relative_eq!(scale, 0.4);
    }

    #[test]
    fn test_fit_scale_shrinks_in_steps() {
        // 100 chars: width = 1000 * scale, fits 320 at scale <= 0.32.
        let content = "x".repeat(100);
        let scale = fit_scale(&Fixed, &content, 320.0, ScaleSteps::default());
        assert_relative_eq!(scale, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_scale_stops_at_floor() {
        let content = "x".repeat(10_000);
        let scale = fit_scale(&Fixed, &content, 320.0, ScaleSteps::default());
        assert_relative_eq!(scale, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_typeface_width_grows_with_length_and_scale() {
        let face = Typeface::embedded().unwrap();
        let short = face.text_width("1.5", 0.4);
        let long = face.text_width("1.5000", 0.4);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(face.text_width("1.5", 0.8) > short);
        assert_relative_eq!(face.text_width("", 0.4), 0.0);
    }

    #[test]
    fn test_typeface_draws_pixels() {
        let face = Typeface::embedded().unwrap();
        let blank = Framebuffer::filled(80, 40, Rgb::WHITE).unwrap();
        let mut fb = blank.clone();
        face.draw(&mut fb, "y = 1", (2.0, 20.0), 0.4, Rgb::BLACK, Orientation::Horizontal);
        assert!(fb.diff_count(&blank) > 0);
    }

    #[test]
    fn test_rotated_text_runs_upwards() {
        let face = Typeface::embedded().unwrap();
        let blank = Framebuffer::filled(40, 80, Rgb::WHITE).unwrap();
        let mut fb = blank.clone();
        face.draw(&mut fb, "1234", (20.0, 70.0), 0.4, Rgb::BLACK, Orientation::RotatedCcw);

        // Every touched pixel sits above the origin row.
        for y in 71..80 {
            for x in 0..40 {
                assert_eq!(fb.get_pixel(x, y), Some(Rgb::WHITE));
            }
        }
        assert!(fb.diff_count(&blank) > 0);
    }
}
