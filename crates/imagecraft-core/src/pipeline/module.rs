use crate::error::Result;
use crate::image_buf::Image;

/// A single step in the filter pipeline.
pub trait FilterModule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Check the parameters without touching an image.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Transform `image` in place. Implementations validate first and leave
    /// the image untouched when they return an error.
    fn apply(&self, image: &mut Image) -> Result<()>;
}
