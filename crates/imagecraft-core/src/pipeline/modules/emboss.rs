use tracing::info;

use crate::error::Result;
use crate::filters::{Kernel3, convolve_3x3};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

pub const EMBOSS_KERNEL: Kernel3 = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];

/// Relief effect. The kernel weights sum to 1, which is used as the divisor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Emboss;

impl FilterModule for Emboss {
    fn name(&self) -> &'static str {
        "emboss"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        info!("applying emboss");
        convolve_3x3(image, &EMBOSS_KERNEL, 0.0);
        Ok(())
    }
}
