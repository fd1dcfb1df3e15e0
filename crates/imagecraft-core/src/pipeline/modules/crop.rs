use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ImageError, Result};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

/// Keep the top-left `width` x `height` region.
///
/// Requested sizes larger than the image are clamped to it; the image is
/// never upsampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub width: u32,
    pub height: u32,
}

impl Crop {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let crop = Self { width, height };
        crop.validate()?;
        Ok(crop)
    }
}

impl FilterModule for Crop {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::invalid_param(format!(
                "crop dimensions must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.validate()?;
        let width = self.width.min(image.width());
        let height = self.height.min(image.height());
        if width == image.width() && height == image.height() {
            return Ok(());
        }

        info!(width, height, "cropping");
        let mut cropped = Image::new(width, height)?;
        cropped.map_pixels(|x, y, _| image.get_pixel(x as i64, y as i64));
        *image = cropped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn numbered(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height).unwrap();
        img.map_pixels(|x, y, _| Color::new(x as f32 / 255.0, y as f32 / 255.0, 0.0));
        img
    }

    #[test]
    fn oversized_crop_is_identity() {
        let mut img = numbered(100, 50);
        let expected = img.clone();
        Crop::new(1000, 1000).unwrap().apply(&mut img).unwrap();
        assert_eq!(img, expected);
    }

    #[test]
    fn crop_reduces_dimensions() {
        let mut img = numbered(8, 6);
        Crop::new(3, 2).unwrap().apply(&mut img).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.pixel_count(), 6);
    }

    #[test]
    fn crop_keeps_top_left_region() {
        let mut img = numbered(8, 6);
        let original = img.clone();
        Crop::new(4, 3).unwrap().apply(&mut img).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(img.get_pixel(x, y), original.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn crop_clamps_each_axis_independently() {
        let mut img = numbered(10, 4);
        Crop::new(5, 100).unwrap().apply(&mut img).unwrap();
        assert_eq!((img.width(), img.height()), (5, 4));
    }

    #[test]
    fn zero_crop_rejected() {
        assert!(Crop::new(0, 5).is_err());
        let mut img = numbered(4, 4);
        let expected = img.clone();
        let bad = Crop {
            width: 3,
            height: 0,
        };
        assert!(bad.apply(&mut img).is_err());
        assert_eq!(img, expected);
    }
}
