use tracing::info;

use crate::color::Color;
use crate::error::Result;
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

/// Invert every channel, `1 - c`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Negative;

impl FilterModule for Negative {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        info!("applying negative");
        image.map_pixels(|_, _, c| Color::WHITE - c);
        Ok(())
    }
}
