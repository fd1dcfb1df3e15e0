use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;
use crate::pipeline::modules::{
    BoxBlur, Crop, EdgeDetect, Emboss, GaussianBlur, Grayscale, Median, Negative, Sepia, Sharpen,
    Vignette,
};

/// Every filter the pipeline can run, with its typed parameters.
///
/// Serialized with an internal `filter` tag, e.g.
/// `{"filter": "crop", "width": 800, "height": 600}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    Crop(Crop),
    Grayscale,
    Negative,
    Sharpen,
    EdgeDetect(EdgeDetect),
    Median(Median),
    GaussianBlur(GaussianBlur),
    Sepia,
    Vignette(Vignette),
    Emboss,
    BoxBlur(BoxBlur),
}

impl Filter {
    pub fn module(&self) -> &dyn FilterModule {
        match self {
            Filter::Crop(m) => m,
            Filter::Grayscale => &Grayscale,
            Filter::Negative => &Negative,
            Filter::Sharpen => &Sharpen,
            Filter::EdgeDetect(m) => m,
            Filter::Median(m) => m,
            Filter::GaussianBlur(m) => m,
            Filter::Sepia => &Sepia,
            Filter::Vignette(m) => m,
            Filter::Emboss => &Emboss,
            Filter::BoxBlur(m) => m,
        }
    }

    pub fn name(&self) -> &'static str {
        self.module().name()
    }

    pub fn validate(&self) -> Result<()> {
        self.module().validate()
    }

    pub fn apply(&self, image: &mut Image) -> Result<()> {
        self.module().apply(image)
    }
}
