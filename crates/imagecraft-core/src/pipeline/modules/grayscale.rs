use tracing::info;

use crate::color::Color;
use crate::error::Result;
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

/// Replace every pixel with its luminance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grayscale;

impl FilterModule for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        info!("converting to grayscale");
        image.map_pixels(|_, _, c| Color::gray(c.luminance()));
        Ok(())
    }
}
