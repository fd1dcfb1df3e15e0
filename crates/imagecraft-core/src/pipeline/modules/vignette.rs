use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ImageError, Result};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

pub const DEFAULT_VIGNETTE_INTENSITY: f32 = 0.8;

/// Darken pixels in proportion to their distance from the image center.
///
/// Each pixel is scaled by `max(0, 1 - d / d_max * intensity)`, where `d_max`
/// is the center-to-corner distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vignette {
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    DEFAULT_VIGNETTE_INTENSITY
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_VIGNETTE_INTENSITY,
        }
    }
}

impl Vignette {
    /// Out-of-range intensities are clamped into [0, 1] with a warning.
    pub fn new(intensity: f32) -> Result<Self> {
        let vignette = Self { intensity };
        vignette.validate()?;
        Ok(Self {
            intensity: vignette.clamped_intensity(),
        })
    }

    fn clamped_intensity(&self) -> f32 {
        if !(0.0..=1.0).contains(&self.intensity) {
            warn!(
                intensity = self.intensity,
                "vignette intensity should be between 0 and 1, clamping"
            );
        }
        self.intensity.clamp(0.0, 1.0)
    }
}

impl FilterModule for Vignette {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn validate(&self) -> Result<()> {
        if self.intensity.is_nan() {
            return Err(ImageError::invalid_param("vignette intensity is NaN"));
        }
        Ok(())
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.validate()?;
        let intensity = self.clamped_intensity();
        info!(intensity, "applying vignette");

        let cx = image.width() as f32 / 2.0;
        let cy = image.height() as f32 / 2.0;
        let max_distance = (cx * cx + cy * cy).sqrt().max(1.0);

        image.map_pixels(|x, y, c| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let distance = (dx * dx + dy * dy).sqrt();
            let factor = (1.0 - distance / max_distance * intensity).max(0.0);
            c * factor
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn white(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height).unwrap();
        img.fill(Color::WHITE);
        img
    }

    #[test]
    fn center_is_brightest() {
        let mut img = white(9, 9);
        Vignette::default().apply(&mut img).unwrap();
        let center = img.get_pixel(4, 4).r;
        let corner = img.get_pixel(0, 0).r;
        assert!(center > corner);
        assert!(corner > 0.0);
    }

    #[test]
    fn zero_intensity_is_identity() {
        let mut img = white(5, 3);
        let expected = img.clone();
        Vignette::new(0.0).unwrap().apply(&mut img).unwrap();
        assert_eq!(img, expected);
    }

    #[test]
    fn out_of_range_intensity_is_clamped() {
        assert_eq!(Vignette::new(3.0).unwrap().intensity, 1.0);
        assert_eq!(Vignette::new(-0.5).unwrap().intensity, 0.0);
        assert!(Vignette::new(f32::NAN).is_err());
    }

    #[test]
    fn full_intensity_blackens_far_corner() {
        // Pixel (0, 0) sits exactly d_max from the center (w/2, h/2).
        let mut img = white(4, 4);
        Vignette::new(1.0).unwrap().apply(&mut img).unwrap();
        assert_eq!(img.get_pixel(0, 0), Color::BLACK);
        assert_eq!(img.get_pixel(2, 2), Color::WHITE);
    }
}
