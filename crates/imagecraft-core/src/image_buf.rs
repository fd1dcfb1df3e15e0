use crate::color::Color;
use crate::error::{ImageError, Result};

/// Row-major RGB raster of [`Color`] pixels.
///
/// The buffer always holds exactly `width * height` pixels. Dimensions are
/// only changed by replacing the buffer and the dimensions together
/// ([`Image::resize`], or assigning a new `Image` as crop does).
///
/// Pixel access is total: [`Image::get_pixel`] returns black and
/// [`Image::set_pixel`] does nothing for coordinates outside the image.
/// Filters rely on this instead of checking bounds themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Allocate a black image. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Color::BLACK; len],
        })
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(ImageError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Row-major view of all pixels.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn is_valid_coord(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Pixel at `(x, y)`, or black when the coordinate is out of range.
    pub fn get_pixel(&self, x: i64, y: i64) -> Color {
        if !self.is_valid_coord(x, y) {
            return Color::BLACK;
        }
        self.pixels[self.index(x as u32, y as u32)]
    }

    /// Store `color` clamped to [0, 1]. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if !self.is_valid_coord(x, y) {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = color.clamp();
    }

    /// Pixel at the nearest in-bounds coordinate (clamp-to-edge sampling).
    pub fn get_clamped(&self, x: i64, y: i64) -> Color {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixels[self.index(cx, cy)]
    }

    /// Replace every pixel with `f(x, y, old)`, clamped.
    pub fn map_pixels(&mut self, mut f: impl FnMut(u32, u32, Color) -> Color) {
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *pixel = f(x, y, *pixel).clamp();
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.clamp());
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Color::BLACK);
    }

    /// Nearest-neighbor resample to `new_width` x `new_height`.
    ///
    /// Target `(x, y)` reads source `(x * w / new_w, y * h / new_h)`, rounded
    /// down. On error the image is left untouched.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<()> {
        let len = checked_len(new_width, new_height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..new_height {
            let src_y = (y as u64 * self.height as u64 / new_height as u64) as u32;
            let src_y = src_y.min(self.height - 1);
            for x in 0..new_width {
                let src_x = (x as u64 * self.width as u64 / new_width as u64) as u32;
                let src_x = src_x.min(self.width - 1);
                pixels.push(self.pixels[self.index(src_x, src_y)]);
            }
        }
        *self = Self {
            width: new_width,
            height: new_height,
            pixels,
        };
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ImageError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        })
}
