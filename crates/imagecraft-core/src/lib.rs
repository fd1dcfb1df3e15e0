//! Core of imagecraft: a 24-bit BMP codec, an RGB image buffer and an
//! ordered filter pipeline.
//!
//! ```no_run
//! use imagecraft_core::bmp;
//! use imagecraft_core::pipeline::{Filter, Pipeline};
//! use imagecraft_core::pipeline::modules::GaussianBlur;
//!
//! let mut image = bmp::decode("input.bmp")?;
//! let mut pipeline = Pipeline::new();
//! pipeline.push(Filter::Grayscale);
//! pipeline.push(Filter::GaussianBlur(GaussianBlur::new(1.5)?));
//! pipeline.apply(&mut image);
//! bmp::encode("output.bmp", &image)?;
//! # Ok::<(), imagecraft_core::ImageError>(())
//! ```

pub mod bmp;
pub mod color;
pub mod error;
pub mod filters;
pub mod image_buf;
pub mod pipeline;

pub use color::Color;
pub use error::{ImageError, Result};
pub use image_buf::Image;
