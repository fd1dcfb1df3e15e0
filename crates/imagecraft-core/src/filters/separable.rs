use crate::color::Color;
use crate::error::{ImageError, Result};
use crate::image_buf::Image;

/// Largest radius accepted for blur kernels. Wider kernels would cover
/// any realistic image many times over.
pub const MAX_KERNEL_RADIUS: u32 = 4096;

/// Radius `ceil(3 * sigma)` of the Gaussian for `sigma`, without building it.
pub fn gaussian_radius(sigma: f32) -> Result<u32> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(ImageError::invalid_param(format!(
            "blur sigma must be positive (got {sigma})"
        )));
    }
    let radius = (3.0 * sigma as f64).ceil();
    if radius > MAX_KERNEL_RADIUS as f64 {
        return Err(ImageError::invalid_param(format!(
            "blur sigma {sigma} needs a kernel radius above {MAX_KERNEL_RADIUS}"
        )));
    }
    Ok(radius as u32)
}

/// Normalized 1-D Gaussian of radius `ceil(3 * sigma)`.
///
/// Weights are `exp(-d^2 / (2 sigma^2))` for `d` in `-radius..=radius`,
/// scaled to sum to 1.
pub fn gaussian_kernel(sigma: f32) -> Result<Vec<f32>> {
    let radius = gaussian_radius(sigma)? as i64;

    // f64 keeps 2*sigma^2 non-zero for the smallest positive f32 sigmas.
    let sigma = sigma as f64;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let raw: Vec<f64> = (-radius..=radius)
        .map(|d| (-((d * d) as f64) / two_sigma_sq).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    Ok(raw.into_iter().map(|w| (w / sum) as f32).collect())
}

/// Check a box blur radius: positive and at most [`MAX_KERNEL_RADIUS`].
pub fn validate_box_radius(radius: u32) -> Result<()> {
    if radius == 0 {
        return Err(ImageError::invalid_param("box blur radius must be positive"));
    }
    if radius > MAX_KERNEL_RADIUS {
        return Err(ImageError::invalid_param(format!(
            "box blur radius must be at most {MAX_KERNEL_RADIUS} (got {radius})"
        )));
    }
    Ok(())
}

/// Uniform 1-D kernel of radius `radius`.
pub fn box_kernel(radius: u32) -> Result<Vec<f32>> {
    validate_box_radius(radius)?;
    let size = 2 * radius as usize + 1;
    Ok(vec![1.0 / size as f32; size])
}

/// Convolve with a symmetric 1-D kernel horizontally, then vertically.
///
/// The horizontal pass reads from a snapshot of the input; its result is
/// copied back into the snapshot before the vertical pass.
pub fn separable_convolve(image: &mut Image, weights: &[f32]) {
    let radius = (weights.len() / 2) as i64;
    let mut snapshot = image.clone();

    image.map_pixels(|x, y, _| {
        weights
            .iter()
            .enumerate()
            .fold(Color::BLACK, |acc, (i, &w)| {
                acc + snapshot.get_clamped(x as i64 + i as i64 - radius, y as i64) * w
            })
    });

    snapshot.clone_from(image);

    image.map_pixels(|x, y, _| {
        weights
            .iter()
            .enumerate()
            .fold(Color::BLACK, |acc, (i, &w)| {
                acc + snapshot.get_clamped(x as i64, y as i64 + i as i64 - radius) * w
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_dot(size: u32) -> Image {
        let mut img = Image::new(size, size).unwrap();
        let c = (size / 2) as i64;
        img.set_pixel(c, c, Color::WHITE);
        img
    }

    #[test]
    fn kernel_size_and_normalization() {
        let k = gaussian_kernel(1.0).unwrap();
        assert_eq!(k.len(), 7);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(k[3] > k[2] && k[2] > k[1] && k[1] > k[0]);
        assert!((k[0] - k[6]).abs() < 1e-7);

        assert_eq!(gaussian_kernel(0.5).unwrap().len(), 5);
        assert_eq!(gaussian_kernel(1.2).unwrap().len(), 9);
    }

    #[test]
    fn tiny_sigma_concentrates_at_center() {
        let k = gaussian_kernel(1e-4).unwrap();
        assert_eq!(k.len(), 3);
        assert!((k[1] - 1.0).abs() < 1e-6);
        assert!(k[0] < 1e-6);
    }

    #[test]
    fn rejects_non_positive_sigma() {
        assert!(gaussian_kernel(0.0).is_err());
        assert!(gaussian_kernel(-1.0).is_err());
        assert!(gaussian_kernel(f32::NAN).is_err());
    }

    #[test]
    fn huge_sigma_rejected_without_allocating() {
        assert_eq!(gaussian_radius(1.0).unwrap(), 3);
        assert_eq!(gaussian_radius(1365.0).unwrap(), 4095);
        assert!(matches!(
            gaussian_radius(1e12),
            Err(ImageError::InvalidFilterParameter(_))
        ));
        assert!(matches!(
            gaussian_kernel(f32::MAX),
            Err(ImageError::InvalidFilterParameter(_))
        ));
    }

    #[test]
    fn huge_box_radius_rejected() {
        assert!(validate_box_radius(MAX_KERNEL_RADIUS).is_ok());
        assert!(matches!(
            box_kernel(u32::MAX),
            Err(ImageError::InvalidFilterParameter(_))
        ));
    }

    #[test]
    fn box_kernel_is_uniform() {
        let k = box_kernel(2).unwrap();
        assert_eq!(k.len(), 5);
        assert!(k.iter().all(|&w| (w - 0.2).abs() < 1e-7));
        assert!(box_kernel(0).is_err());
    }

    #[test]
    fn blur_preserves_flat_image() {
        let mut img = Image::new(6, 3).unwrap();
        img.fill(Color::new(0.2, 0.5, 0.8));
        let expected = img.clone();
        separable_convolve(&mut img, &gaussian_kernel(2.0).unwrap());
        for (a, b) in img.pixels().iter().zip(expected.pixels()) {
            assert!(a.distance(*b) < 1e-5);
        }
    }

    #[test]
    fn blur_spreads_energy_symmetrically() {
        let mut img = single_dot(9);
        separable_convolve(&mut img, &gaussian_kernel(1.0).unwrap());
        let center = img.get_pixel(4, 4).r;
        assert!(center < 1.0 && center > 0.0);
        assert!((img.get_pixel(3, 4).r - img.get_pixel(5, 4).r).abs() < 1e-6);
        assert!((img.get_pixel(4, 3).r - img.get_pixel(4, 5).r).abs() < 1e-6);
        assert!((img.get_pixel(3, 4).r - img.get_pixel(4, 3).r).abs() < 1e-6);
        let total: f32 = img.pixels().iter().map(|c| c.r).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn tiny_sigma_is_near_identity() {
        let mut img = single_dot(5);
        let expected = img.clone();
        separable_convolve(&mut img, &gaussian_kernel(0.01).unwrap());
        for (a, b) in img.pixels().iter().zip(expected.pixels()) {
            assert!(a.distance(*b) < 1e-5);
        }
    }

    #[test]
    fn box_blur_averages_window() {
        let mut img = single_dot(5);
        separable_convolve(&mut img, &box_kernel(1).unwrap());
        assert!((img.get_pixel(2, 2).r - 1.0 / 9.0).abs() < 1e-6);
        assert!((img.get_pixel(1, 1).r - 1.0 / 9.0).abs() < 1e-6);
        assert_eq!(img.get_pixel(0, 0).r, 0.0);
    }
}
