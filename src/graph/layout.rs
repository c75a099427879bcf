//! Fixed canvas geometry shared by the background composer and the overlay.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::render::ScaleSteps;

/// Canvas dimensions, plot rectangle, grid divisions and text sizes.
///
/// The default is the 320×240 layout every graph streams at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Region the data ranges are mapped onto.
    pub plot: Rect,
    /// Divisions of the raw x extent; the padded range adds one on each side.
    pub x_divisions: u32,
    /// Divisions of the raw y extent.
    pub y_divisions: u32,
    /// Curve samples per grid cell.
    pub samples_per_cell: u32,
    /// Pixel budget of a single tick label.
    pub label_budget: f64,
    /// Font scale of tick labels and the overlay value label.
    pub label_scale: f64,
    /// Shrink ladder for the equation caption.
    pub caption: ScaleSteps,
    /// Distance of the caption baseline from the bottom edge.
    pub caption_inset: f64,
    /// Baseline row of the overlay value label.
    pub value_label_y: f64,
    /// Horizontal gap between the marker and its value label.
    pub value_label_gap: f64,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            plot: Rect::new(31.0, 0.0, 288.0, 192.0),
            x_divisions: 7,
            y_divisions: 4,
            samples_per_cell: 50,
            label_budget: 30.0,
            label_scale: 0.4,
            caption: ScaleSteps::default(),
            caption_inset: 4.0,
            value_label_y: 50.0,
            value_label_gap: 5.0,
        }
    }
}

impl CanvasLayout {
    /// Check the layout describes a drawable canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the canvas is empty or the plot
    /// rectangle is empty or does not fit inside it.
    pub fn validate(&self) -> Result<()> {
        let invalid = Error::InvalidDimensions { width: self.width, height: self.height };
        if self.width == 0 || self.height == 0 {
            return Err(invalid);
        }

        let plot = &self.plot;
        let fits = plot.width > 0.0
            && plot.height > 0.0
            && plot.left() >= 0.0
            && plot.top() >= 0.0
            && plot.right() <= f64::from(self.width)
            && plot.bottom() <= f64::from(self.height);
        if !fits {
            return Err(invalid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = CanvasLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!((layout.width, layout.height), (320, 240));
    }

    #[test]
    fn test_empty_canvas_rejected() {
        let layout = CanvasLayout { width: 0, ..CanvasLayout::default() };
        assert!(matches!(layout.validate(), Err(Error::InvalidDimensions { width: 0, .. })));
    }

    #[test]
    fn test_plot_outside_canvas_rejected() {
        let layout = CanvasLayout { plot: Rect::new(31.0, 0.0, 300.0, 192.0), ..CanvasLayout::default() };
        assert!(layout.validate().is_err());
    }
}
