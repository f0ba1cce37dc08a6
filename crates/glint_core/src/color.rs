//! RGB color with a reflectivity channel.

use std::ops::{Add, Mul};

use glint_math::Interval;

/// Valid range of a display channel (8-bit scale).
pub const CHANNEL_RANGE: Interval = Interval::new(0.0, 255.0);

/// Valid range of the reflectivity channel.
pub const ALPHA_RANGE: Interval = Interval::new(0.0, 1.0);

/// A color on the 8-bit display scale.
///
/// `red`, `green` and `blue` live in `[0, 255]` once clipped. `alpha` is not
/// opacity: it is the surface reflectivity, i.e. how much of a reflected
/// color is blended into this surface's shaded result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new color.
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Attenuate the RGB channels by `k`. Reflectivity is unchanged.
    pub fn scale(self, k: f64) -> Self {
        Self {
            red: self.red * k,
            green: self.green * k,
            blue: self.blue * k,
            alpha: self.alpha,
        }
    }

    /// Clamp every channel into its valid range.
    pub fn clip(self) -> Self {
        Self {
            red: CHANNEL_RANGE.clamp(self.red),
            green: CHANNEL_RANGE.clamp(self.green),
            blue: CHANNEL_RANGE.clamp(self.blue),
            alpha: ALPHA_RANGE.clamp(self.alpha),
        }
    }

    /// Convert to an 8-bit RGB triplet (clipped, fractional part dropped).
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clip();
        [c.red as u8, c.green as u8, c.blue as u8]
    }
}

/// Additive composition. The reflectivity of the left operand is kept.
impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color {
            red: self.red + rhs.red,
            green: self.green + rhs.green,
            blue: self.blue + rhs.blue,
            alpha: self.alpha,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, k: f64) -> Color {
        self.scale(k)
    }
}
