mod box_blur;
mod crop;
mod edge_detect;
mod emboss;
mod gaussian_blur;
mod grayscale;
mod median;
mod negative;
mod sepia;
mod sharpen;
mod vignette;

pub use box_blur::BoxBlur;
pub use crop::Crop;
pub use edge_detect::EdgeDetect;
pub use emboss::Emboss;
pub use gaussian_blur::GaussianBlur;
pub use grayscale::Grayscale;
pub use median::Median;
pub use negative::Negative;
pub use sepia::Sepia;
pub use sharpen::Sharpen;
pub use vignette::{DEFAULT_VIGNETTE_INTENSITY, Vignette};
