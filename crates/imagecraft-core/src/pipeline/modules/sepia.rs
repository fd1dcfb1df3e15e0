use tracing::info;

use crate::color::Color;
use crate::error::Result;
use crate::image_buf::Image;
use crate::pipeline::module::FilterModule;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sepia;

impl FilterModule for Sepia {
    fn name(&self) -> &'static str {
        "sepia"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        info!("applying sepia");
        image.map_pixels(|_, _, c| {
            Color::new(
                0.272 * c.r + 0.534 * c.g + 0.131 * c.b,
                0.349 * c.r + 0.686 * c.g + 0.168 * c.b,
                0.393 * c.r + 0.769 * c.g + 0.189 * c.b,
            )
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_stays_black() {
        let mut img = Image::new(2, 2).unwrap();
        Sepia.apply(&mut img).unwrap();
        assert!(img.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn mid_gray_tints_and_clamps() {
        let mut img = Image::new(1, 1).unwrap();
        img.fill(Color::gray(0.8));
        Sepia.apply(&mut img).unwrap();
        let c = img.get_pixel(0, 0);
        assert!((c.r - 0.8 * 0.937).abs() < 1e-5);
        // 0.8 * 1.351 overflows and is clamped.
        assert_eq!(c.b, 1.0);
        assert!(c.r < c.g && c.g <= c.b);
    }
}
