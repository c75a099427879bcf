//! Data-to-pixel mapping.
//!
//! An [`AxisRange`] is the padded data interval shown along one canvas
//! dimension; a [`CoordinateMapper`] pairs two of them with the plot
//! rectangle and converts data-space points into pixel space.

use crate::geometry::{Point, Rect};

/// Padding step used when every value on an axis is identical.
pub const DEGENERATE_STEP: f64 = 1.0e-3;

/// Padded `[min, max]` interval of one axis.
///
/// Built by scanning the data extent, splitting it into a fixed number of
/// divisions, and widening it by one division on each side. `max > min`
/// holds for every range built from finite data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound (after padding).
    pub min: f64,
    /// Upper bound (after padding).
    pub max: f64,
    /// Width of one grid cell in data units.
    pub step: f64,
}

impl AxisRange {
    /// Padded range of `values` split into `divisions` cells.
    ///
    /// Returns `None` for empty input. A `divisions` of zero is treated as
    /// one; a zero-width extent (or one too narrow to widen at the values'
    /// magnitude) is padded by [`DEGENERATE_STEP`].
    #[must_use]
    pub fn padded(values: &[f64], divisions: u32) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        let divisions = f64::from(divisions.max(1));
        let mut step = (max - min) / divisions;
        if !(step > 0.0 && step.is_finite()) || min - step >= min || max + step <= max {
            // Large magnitudes need a step of at least a few ulps to stay non-empty.
            let ulps = min.abs().max(max.abs()) * f64::EPSILON * 4.0;
            step = DEGENERATE_STEP.max(ulps);
        }

        Some(Self { min: min - step, max: max + step, step })
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the way from `min` to `max` (unclamped).
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Clamp a value into the range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies strictly inside the range.
    #[must_use]
    pub fn contains_open(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    /// Value of the `index`-th grid line, counting from `min`.
    #[must_use]
    pub fn tick(&self, index: u32) -> f64 {
        self.min + self.step * f64::from(index)
    }

    /// Number of whole cells between `min` and `max`.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        (self.span() / self.step).round() as u32
    }
}

/// Converts data-space coordinates to pixel coordinates inside a plot
/// rectangle. The y axis is inverted: larger data values map to smaller
/// pixel rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x_range: AxisRange,
    y_range: AxisRange,
    plot: Rect,
}

impl CoordinateMapper {
    /// Create a mapper.
    #[must_use]
    pub const fn new(x_range: AxisRange, y_range: AxisRange, plot: Rect) -> Self {
        Self { x_range, y_range, plot }
    }

    /// Horizontal range.
    #[must_use]
    pub const fn x_range(&self) -> &AxisRange {
        &self.x_range
    }

    /// Vertical range.
    #[must_use]
    pub const fn y_range(&self) -> &AxisRange {
        &self.y_range
    }

    /// Plot rectangle.
    #[must_use]
    pub const fn plot(&self) -> &Rect {
        &self.plot
    }

    /// Map a data point to pixel space. No clamping is applied.
    #[must_use]
    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        to_pixel(x, y, &self.x_range, &self.y_range, &self.plot)
    }
}

/// Map `(x, y)` into `plot` given the data ranges of both axes.
///
/// Callers must pass non-degenerate ranges; ranges built by
/// [`AxisRange::padded`] always are.
#[must_use]
pub fn to_pixel(x: f64, y: f64, x_range: &AxisRange, y_range: &AxisRange, plot: &Rect) -> Point {
    let frac_x = x_range.fraction(x);
    let frac_y = y_range.fraction(y);

    Point::new(plot.x + frac_x * plot.width, plot.y + (1.0 - frac_y) * plot.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mapper() -> CoordinateMapper {
        let x = AxisRange::padded(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 7).unwrap();
        let y = AxisRange::padded(&[0.0, 4.0], 4).unwrap();
        CoordinateMapper::new(x, y, Rect::new(31.0, 0.0, 288.0, 192.0))
    }

    #[test]
    fn test_padded_range() {
        let range = AxisRange::padded(&[1.0, 5.0, 3.0], 4).unwrap();
        assert_relative_eq!(range.step, 1.0);
        assert_relative_eq!(range.min, 0.0);
        assert_relative_eq!(range.max, 6.0);
        assert_eq!(range.cell_count(), 6);
    }

    #[test]
    fn test_padded_range_degenerate() {
        let range = AxisRange::padded(&[2.5, 2.5, 2.5], 7).unwrap();
        assert!(range.max > range.min);
        assert_relative_eq!(range.step, DEGENERATE_STEP);
        assert_relative_eq!(range.min, 2.5 - DEGENERATE_STEP);
    }

    #[test]
    fn test_padded_range_zero_divisions() {
        let range = AxisRange::padded(&[0.0, 2.0], 0).unwrap();
        assert_relative_eq!(range.step, 2.0);
        assert_relative_eq!(range.min, -2.0);
    }

    #[test]
    fn test_padded_range_empty() {
        assert!(AxisRange::padded(&[], 4).is_none());
    }

    #[test]
    fn test_ticks() {
        let range = AxisRange::padded(&[0.0, 4.0], 4).unwrap();
        assert_relative_eq!(range.tick(0), -1.0);
        assert_relative_eq!(range.tick(6), 5.0);
    }

    #[test]
    fn test_to_pixel_corners() {
        let m = mapper();
        let top_left = m.to_pixel(m.x_range().min, m.y_range().max);
        assert_relative_eq!(top_left.x, 31.0);
        assert_relative_eq!(top_left.y, 0.0);

        let bottom_right = m.to_pixel(m.x_range().max, m.y_range().min);
        assert_relative_eq!(bottom_right.x, 319.0);
        assert_relative_eq!(bottom_right.y, 192.0);
    }

    #[test]
    fn test_to_pixel_unclamped() {
        let m = mapper();
        let outside = m.to_pixel(m.x_range().max + m.x_range().span(), 0.0);
        assert!(outside.x > 319.0);
    }

    #[test]
    fn test_clamp_and_contains() {
        let range = AxisRange::padded(&[0.0, 4.0], 4).unwrap();
        assert_relative_eq!(range.clamp(100.0), 5.0);
        assert_relative_eq!(range.clamp(-100.0), -1.0);
        assert!(range.contains_open(0.0));
        assert!(!range.contains_open(5.0));
    }
}
