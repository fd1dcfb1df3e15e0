use tracing::info;

use crate::error::Result;
use crate::filters::{Kernel3, convolve_3x3};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

pub const SHARPEN_KERNEL: Kernel3 = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sharpen;

impl FilterModule for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        info!("applying sharpen");
        convolve_3x3(image, &SHARPEN_KERNEL, 1.0);
        Ok(())
    }
}
