use crate::color::Color;
use crate::image_buf::Image;

/// Row-major 3x3 kernel, `kernel[ky][kx]`.
pub type Kernel3 = [[f32; 3]; 3];

/// Convolve with a fixed 3x3 kernel.
///
/// The sum for each pixel is divided by `divisor`. A zero divisor normalizes
/// by the sum of the kernel weights instead, and if that is zero too the raw
/// sum is stored. Results are clamped on write.
pub fn convolve_3x3(image: &mut Image, kernel: &Kernel3, divisor: f32) {
    let weight_sum: f32 = kernel.iter().flatten().sum();
    let norm = if divisor != 0.0 {
        1.0 / divisor
    } else if weight_sum != 0.0 {
        1.0 / weight_sum
    } else {
        1.0
    };

    let snapshot = image.clone();
    image.map_pixels(|x, y, _| {
        let (x, y) = (x as i64, y as i64);
        let mut sum = Color::BLACK;
        for (ky, row) in kernel.iter().enumerate() {
            for (kx, &weight) in row.iter().enumerate() {
                let sample = snapshot.get_clamped(x + kx as i64 - 1, y + ky as i64 - 1);
                sum = sum + sample * weight;
            }
        }
        sum * norm
    });
}
