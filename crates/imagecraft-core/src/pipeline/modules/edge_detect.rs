use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::Color;
use crate::error::{ImageError, Result};
use crate::filters::{Kernel3, convolve_3x3};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;
use crate::pipeline::modules::Grayscale;

pub const LAPLACIAN_KERNEL: Kernel3 = [[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]];

/// Grayscale, Laplacian, then binarize: values above `threshold` become
/// white and everything else black.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDetect {
    pub threshold: f32,
}

impl EdgeDetect {
    pub fn new(threshold: f32) -> Result<Self> {
        let edge = Self { threshold };
        edge.validate()?;
        Ok(edge)
    }
}

impl FilterModule for EdgeDetect {
    fn name(&self) -> &'static str {
        "edge_detection"
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ImageError::invalid_param(format!(
                "edge threshold must be between 0 and 1 (got {})",
                self.threshold
            )));
        }
        Ok(())
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.validate()?;
        info!(threshold = self.threshold, "applying edge detection");

        Grayscale.apply(image)?;
        convolve_3x3(image, &LAPLACIAN_KERNEL, 1.0);
        image.map_pixels(|_, _, c| {
            if c.r > self.threshold {
                Color::WHITE
            } else {
                Color::BLACK
            }
        });
        Ok(())
    }
}
