//! Core framebuffer for pixel rendering.
//!
//! A tightly packed, row-major RGB raster. This is the frame format pushed
//! to video sinks: 3 channels, 8 bits each, no alpha and no row padding.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// RGB framebuffer.
///
/// Cloning copies the pixel buffer; for the small canvases streamed here
/// (320×240 is 230 KB) that is cheap enough to do once per redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGB pixels in row-major order, `[R, G, B]` per pixel.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new black framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use livegraph::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(320, 240).unwrap();
    /// assert_eq!(fb.width(), 320);
    /// assert_eq!(fb.height(), 240);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = (width as usize) * (height as usize) * CHANNELS;
        Ok(Self { width, height, pixels: vec![0; size] })
    }

    /// Create a framebuffer filled with `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        let mut fb = Self::new(width, height)?;
        fb.clear(color);
        Ok(fb)
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Packed RGB bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy of the packed RGB bytes.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgb) {
        let [r, g, b] = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(CHANNELS) {
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let [r, g, b] = color.to_array();
        let rect_width = (x2 - x1) as usize;

        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            let row = &mut self.pixels[start..start + rect_width * CHANNELS];

            for chunk in row.chunks_exact_mut(CHANNELS) {
                chunk[0] = r;
                chunk[1] = g;
                chunk[2] = b;
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgb::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let [r, g, b] = color.to_array();
        self.pixels[idx] = r;
        self.pixels[idx + 1] = g;
        self.pixels[idx + 2] = b;
    }

    /// Mix `color` into a pixel with the given coverage (0 = untouched,
    /// 1 = replaced). Used for anti-aliased glyph edges.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgb, coverage: f32) {
        if let Some(dst) = self.get_pixel(x, y) {
            self.set_pixel(x, y, color.blend(dst, coverage));
        }
    }

    /// Number of pixels that differ from `other`.
    ///
    /// Framebuffers of different dimensions differ everywhere.
    #[must_use]
    pub fn diff_count(&self, other: &Self) -> usize {
        if self.width != other.width || self.height != other.height {
            return self.pixel_count().max(other.pixel_count());
        }

        self.pixels
            .chunks_exact(CHANNELS)
            .zip(other.pixels.chunks_exact(CHANNELS))
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Count pixels of exactly `color` inside the half-open column range
    /// `x0..x1` (clamped to the framebuffer).
    #[must_use]
    pub fn count_color_in_columns(&self, x0: u32, x1: u32, color: Rgb) -> usize {
        let x1 = x1.min(self.width);
        (0..self.height)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get_pixel(x, y) == Some(color))
            .count()
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS
    }
}
