//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for basic geometric shapes.

use crate::color::Rgb;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a 1px line using Bresenham's algorithm (non-antialiased).
///
/// Pixels outside the framebuffer are skipped.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `color` - Line color
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        plot(fb, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line between two pixel-space points, rounding to the nearest pixel.
///
/// Segments with a non-finite endpoint are skipped.
pub fn draw_segment(fb: &mut Framebuffer, from: Point, to: Point, color: Rgb) {
    if !from.is_finite() || !to.is_finite() {
        return;
    }
    let (x0, y0) = from.round();
    let (x1, y1) = to.round();
    draw_line(fb, x0, y0, x1, y1, color);
}

/// Draw a vertical 1px line covering rows `y0..=y1` (in either order).
pub fn draw_vline(fb: &mut Framebuffer, x: i32, y0: i32, y1: i32, color: Rgb) {
    let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
    if x < 0 || bottom < 0 {
        return;
    }
    let top = top.max(0) as u32;
    fb.fill_rect(x as u32, top, 1, (bottom as u32 - top) + 1, color);
}

/// Draw a horizontal 1px line covering columns `x0..=x1` (in either order).
pub fn draw_hline(fb: &mut Framebuffer, x0: i32, x1: i32, y: i32, color: Rgb) {
    let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    if y < 0 || right < 0 {
        return;
    }
    let left = left.max(0) as u32;
    fb.fill_rect(left, y as u32, (right as u32 - left) + 1, 1, color);
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `cx`, `cy` - Center coordinates
/// * `radius` - Circle radius in pixels
/// * `color` - Fill color
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgb) {
    if radius <= 0 {
        if radius == 0 {
            plot(fb, cx, cy, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        // Horizontal scan lines for each octant
        draw_hline(fb, cx - x, cx + x, cy + y, color);
        draw_hline(fb, cx - x, cx + x, cy - y, color);
        draw_hline(fb, cx - y, cx + y, cy + x, color);
        draw_hline(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a 1px circle outline using the midpoint algorithm.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgb) {
    if radius <= 0 {
        if radius == 0 {
            plot(fb, cx, cy, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        plot(fb, cx + x, cy + y, color);
        plot(fb, cx - x, cy + y, color);
        plot(fb, cx + x, cy - y, color);
        plot(fb, cx - x, cy - y, color);
        plot(fb, cx + y, cy + x, color);
        plot(fb, cx - y, cy + x, color);
        plot(fb, cx + y, cy - x, color);
        plot(fb, cx - y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Set a pixel given signed coordinates, ignoring anything off-canvas.
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgb) {
    if x >= 0 && y >= 0 {
        fb.set_pixel(x as u32, y as u32, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
