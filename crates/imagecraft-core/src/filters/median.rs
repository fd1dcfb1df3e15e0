use crate::color::Color;
use crate::error::{ImageError, Result};
use crate::image_buf::Image;

/// Largest accepted median window side. Each pixel ranks `window²` samples
/// per channel.
pub const MAX_MEDIAN_WINDOW: u32 = 255;

/// A median window side must be odd, at least 1 and at most
/// [`MAX_MEDIAN_WINDOW`].
pub fn validate_window(window: u32) -> Result<()> {
    if window == 0 || window % 2 == 0 {
        return Err(ImageError::invalid_param(format!(
            "median window size must be odd and positive (got {window})"
        )));
    }
    if window > MAX_MEDIAN_WINDOW {
        return Err(ImageError::invalid_param(format!(
            "median window size must be at most {MAX_MEDIAN_WINDOW} (got {window})"
        )));
    }
    Ok(())
}

/// Per-channel median over a `window x window` neighborhood.
///
/// Each channel is ranked independently, so the output color need not occur
/// anywhere in the neighborhood. An invalid window returns an error before
/// any pixel is touched.
pub fn median_filter(image: &mut Image, window: u32) -> Result<()> {
    validate_window(window)?;
    if window == 1 {
        return Ok(());
    }

    let half = (window / 2) as i64;
    let count = (window as usize).pow(2);
    let mid = count / 2;
    let mut reds = Vec::with_capacity(count);
    let mut greens = Vec::with_capacity(count);
    let mut blues = Vec::with_capacity(count);

    let snapshot = image.clone();
    image.map_pixels(|x, y, _| {
        reds.clear();
        greens.clear();
        blues.clear();
        for dy in -half..=half {
            for dx in -half..=half {
                let c = snapshot.get_clamped(x as i64 + dx, y as i64 + dy);
                reds.push(c.r);
                greens.push(c.g);
                blues.push(c.b);
            }
        }
        Color::new(
            *reds.select_nth_unstable_by(mid, f32::total_cmp).1,
            *greens.select_nth_unstable_by(mid, f32::total_cmp).1,
            *blues.select_nth_unstable_by(mid, f32::total_cmp).1,
        )
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height).unwrap();
        img.map_pixels(|x, y, _| {
            let v = ((x * 7 + y * 13) % 11) as f32 / 10.0;
            Color::new(v, 1.0 - v, (v * 3.0) % 1.0)
        });
        img
    }

    #[test]
    fn window_one_is_identity() {
        let mut img = noisy(6, 5);
        let expected = img.clone();
        median_filter(&mut img, 1).unwrap();
        assert_eq!(img, expected);
    }

    #[test]
    fn even_or_zero_window_rejected_without_mutation() {
        let mut img = noisy(4, 4);
        let expected = img.clone();
        assert!(matches!(
            median_filter(&mut img, 4),
            Err(ImageError::InvalidFilterParameter(_))
        ));
        assert!(median_filter(&mut img, 0).is_err());
        assert_eq!(img, expected);
    }

    #[test]
    fn oversized_window_rejected_without_mutation() {
        assert!(validate_window(MAX_MEDIAN_WINDOW).is_ok());
        let mut img = noisy(2, 2);
        let expected = img.clone();
        assert!(matches!(
            median_filter(&mut img, 99_999),
            Err(ImageError::InvalidFilterParameter(_))
        ));
        assert_eq!(img, expected);
    }

    #[test]
    fn removes_salt_noise() {
        let mut img = Image::new(5, 5).unwrap();
        img.fill(Color::gray(0.2));
        img.set_pixel(2, 2, Color::WHITE);
        median_filter(&mut img, 3).unwrap();
        assert_eq!(img.get_pixel(2, 2), Color::gray(0.2));
    }

    #[test]
    fn channels_ranked_independently() {
        // Three distinct colors in a 3x1 strip; the per-channel median of
        // the middle pixel mixes channels from different inputs.
        let mut img = Image::new(3, 1).unwrap();
        img.set_pixel(0, 0, Color::new(1.0, 0.0, 0.5));
        img.set_pixel(1, 0, Color::new(0.0, 0.5, 1.0));
        img.set_pixel(2, 0, Color::new(0.5, 1.0, 0.0));
        median_filter(&mut img, 3).unwrap();
        // Window rows are clamped copies of the single row, so each channel
        // sees every value three times.
        assert_eq!(img.get_pixel(1, 0), Color::new(0.5, 0.5, 0.5));
    }
}
