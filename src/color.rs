//! 8-bit RGB color type.
//!
//! Frames are plain 3-channel RGB; there is no alpha channel and no color
//! space handling beyond per-channel arithmetic.

use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
///
/// Serializes as a `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
#[repr(C)]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White when `on`, black otherwise.
    #[must_use]
    pub const fn from_flag(on: bool) -> Self {
        if on {
            Self::WHITE
        } else {
            Self::BLACK
        }
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Weighted mix: `self * beta + other * (1 - beta)` per channel.
    ///
    /// `beta` is clamped to `[0, 1]`.
    #[must_use]
    pub fn blend(self, other: Self, beta: f32) -> Self {
        let beta = beta.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f32::from(a) * beta + f32::from(b) * (1.0 - beta)).round() as u8
        };

        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        other.blend(self, t)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}
