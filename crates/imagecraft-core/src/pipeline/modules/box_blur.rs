use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::filters::{box_kernel, separable_convolve, validate_box_radius};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

/// Mean over a `(2 * radius + 1)` square window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxBlur {
    pub radius: u32,
}

impl BoxBlur {
    pub fn new(radius: u32) -> Result<Self> {
        validate_box_radius(radius)?;
        Ok(Self { radius })
    }
}

impl FilterModule for BoxBlur {
    fn name(&self) -> &'static str {
        "box_blur"
    }

    fn validate(&self) -> Result<()> {
        validate_box_radius(self.radius)
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        let kernel = box_kernel(self.radius)?;
        info!(radius = self.radius, "applying box blur");
        separable_convolve(image, &kernel);
        Ok(())
    }
}
