use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// An RGB color with normalized f32 channels.
///
/// Channels are not guaranteed to lie in [0, 1] until [`Color::clamp`] is
/// applied; convolution sums routinely overshoot in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gray with the same value in every channel.
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Color from 8-bit channel values, `byte / 255`.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit channels, `round(clamp(c) * 255)`.
    pub fn to_u8(self) -> [u8; 3] {
        let c = self.clamp();
        [quantize(c.r), quantize(c.g), quantize(c.b)]
    }

    pub fn scale(self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Force every channel into [0, 1].
    pub fn clamp(self) -> Color {
        Color::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Rec. 601 luma: 0.299 R + 0.587 G + 0.114 B.
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Color) -> f32 {
        let d = self - other;
        (d.r * d.r + d.g * d.g + d.b * d.b).sqrt()
    }
}

fn quantize(v: f32) -> u8 {
    (v * 255.0).round() as u8
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_channels() {
        let c = Color::new(-0.5, 0.25, 1.75).clamp();
        assert_eq!(c, Color::new(0.0, 0.25, 1.0));
    }

    #[test]
    fn operations_return_new_values() {
        let a = Color::new(0.2, 0.4, 0.6);
        let b = Color::new(0.1, 0.1, 0.1);
        let sum = a + b;
        assert!((sum.r - 0.3).abs() < 1e-6);
        assert!((sum.b - 0.7).abs() < 1e-6);
        assert_eq!(a, Color::new(0.2, 0.4, 0.6));

        let scaled = a * 0.5;
        assert!((scaled.g - 0.2).abs() < 1e-6);

        let diff = a - b;
        assert!((diff.r - 0.1).abs() < 1e-6);
    }

    #[test]
    fn luminance_of_white_is_one() {
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-6);
        assert_eq!(Color::BLACK.luminance(), 0.0);
    }

    #[test]
    fn luminance_weights_green_most() {
        let r = Color::new(1.0, 0.0, 0.0).luminance();
        let g = Color::new(0.0, 1.0, 0.0).luminance();
        let b = Color::new(0.0, 0.0, 1.0).luminance();
        assert!(g > r && r > b);
        assert!((r - 0.299).abs() < 1e-6);
    }

    #[test]
    fn distance_black_white() {
        let d = Color::BLACK.distance(Color::WHITE);
        assert!((d - 3.0_f32.sqrt()).abs() < 1e-6);
        assert_eq!(Color::WHITE.distance(Color::WHITE), 0.0);
    }

    #[test]
    fn u8_quantization() {
        for byte in [0u8, 1, 127, 128, 254, 255] {
            let c = Color::from_u8(byte, byte, byte);
            assert_eq!(c.to_u8(), [byte, byte, byte]);
        }
        assert_eq!(Color::new(-1.0, 2.0, 0.5).to_u8(), [0, 255, 128]);
    }
}
