use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::filters::{median_filter, validate_window};
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

/// Per-channel median over an odd `window x window` neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Median {
    pub window: u32,
}

impl Median {
    pub fn new(window: u32) -> Result<Self> {
        validate_window(window)?;
        Ok(Self { window })
    }
}

impl FilterModule for Median {
    fn name(&self) -> &'static str {
        "median"
    }

    fn validate(&self) -> Result<()> {
        validate_window(self.window)
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.validate()?;
        info!(window = self.window, "applying median filter");
        median_filter(image, self.window)
    }
}
