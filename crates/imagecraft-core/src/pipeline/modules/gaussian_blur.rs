use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::filters::{gaussian_kernel, gaussian_radius, separable_convolve};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianBlur {
    pub sigma: f32,
}

impl GaussianBlur {
    pub fn new(sigma: f32) -> Result<Self> {
        let blur = Self { sigma };
        blur.validate()?;
        Ok(blur)
    }
}

impl FilterModule for GaussianBlur {
    fn name(&self) -> &'static str {
        "gaussian_blur"
    }

    fn validate(&self) -> Result<()> {
        gaussian_radius(self.sigma).map(|_| ())
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        let kernel = gaussian_kernel(self.sigma)?;
        info!(sigma = self.sigma, "applying gaussian blur");
        debug!(size = kernel.len(), "gaussian kernel");
        separable_convolve(image, &kernel);
        Ok(())
    }
}
