//! Neighborhood primitives shared by the pipeline filters.
//!
//! Every primitive samples from an independent snapshot of the input and
//! treats the border as clamp-to-edge: a neighbor outside the image is
//! replaced by the nearest in-bounds pixel.

mod convolve;
mod median;
mod separable;

pub use convolve::{Kernel3, convolve_3x3};
pub use median::{MAX_MEDIAN_WINDOW, median_filter, validate_window};
pub use separable::{
    MAX_KERNEL_RADIUS, box_kernel, gaussian_kernel, gaussian_radius, separable_convolve,
    validate_box_radius,
};
