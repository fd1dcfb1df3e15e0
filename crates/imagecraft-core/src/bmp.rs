//! Uncompressed 24-bit BMP reader and writer.
//!
//! Only the `BITMAPINFOHEADER` layout with 24 bits per pixel and no
//! compression is accepted. Rows are padded to a multiple of four bytes and
//! may be stored bottom-up (positive height) or top-down (negative height).
//! The writer always emits bottom-up rows after a 54-byte header.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::color::Color;
use crate::error::{ImageError, Result};
use crate::image_buf::Image;

pub const SIGNATURE: [u8; 2] = *b"BM";
pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// 72 DPI expressed in pixels per meter.
const PIXELS_PER_METER: i32 = 2835;

/// The fields of the file and info headers the codec cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    /// Negative for top-down row order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
}

impl BmpHeader {
    /// Read both headers. Fails on a wrong signature or a short read; the
    /// pixel format is not checked here.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut file_header = [0u8; FILE_HEADER_SIZE as usize];
        reader
            .read_exact(&mut file_header)
            .map_err(|e| ImageError::from_read(e, "file header"))?;
        if file_header[0..2] != SIGNATURE {
            return Err(ImageError::BadSignature);
        }

        let mut info = [0u8; INFO_HEADER_SIZE as usize];
        reader
            .read_exact(&mut info)
            .map_err(|e| ImageError::from_read(e, "info header"))?;

        Ok(Self {
            file_size: le_u32(&file_header, 2),
            data_offset: le_u32(&file_header, 10),
            info_size: le_u32(&info, 0),
            width: le_u32(&info, 4) as i32,
            height: le_u32(&info, 8) as i32,
            planes: le_u16(&info, 12),
            bits_per_pixel: le_u16(&info, 14),
            compression: le_u32(&info, 16),
            image_size: le_u32(&info, 20),
        })
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// `(width, |height|)`, rejecting non-positive width and zero height.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        if self.width <= 0 || self.height == 0 {
            return Err(ImageError::InvalidDimensions {
                width: self.width as i64,
                height: self.height as i64,
            });
        }
        Ok((self.width as u32, self.height.unsigned_abs()))
    }

    fn check_supported(&self) -> Result<()> {
        if self.bits_per_pixel != 24 || self.compression != 0 {
            return Err(ImageError::UnsupportedFormat {
                bits_per_pixel: self.bits_per_pixel,
                compression: self.compression,
            });
        }
        Ok(())
    }
}

fn le_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn le_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Bytes per stored row: `width * 3` rounded up to a multiple of 4.
pub fn row_stride(width: u32) -> usize {
    (width as usize * 3 + 3) & !3
}

/// Filler bytes at the end of each stored row.
pub fn row_padding(width: u32) -> usize {
    row_stride(width) - width as usize * 3
}

/// Decode a BMP file.
pub fn decode(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    info!(?path, "decoding BMP");
    let file = File::open(path)?;
    decode_from(BufReader::new(file))
}

/// Decode a BMP stream. Nothing is returned unless every row was read.
pub fn decode_from<R: Read + Seek>(mut reader: R) -> Result<Image> {
    let t0 = std::time::Instant::now();
    let header = BmpHeader::read_from(&mut reader)?;
    header.check_supported()?;
    let (width, height) = header.dimensions()?;

    let stride = row_stride(width);
    let padding = row_padding(width);
    let pixel_bytes = stride as u64 * height as u64;

    // Reject short files before allocating a buffer sized from the header.
    // Any missing row or padding byte is reported here as "pixel data".
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if header.data_offset as u64 + pixel_bytes > stream_len {
        return Err(ImageError::TruncatedFile { stage: "pixel data" });
    }
    reader.seek(SeekFrom::Start(header.data_offset as u64))?;

    debug!(
        width,
        height,
        padding,
        top_down = header.is_top_down(),
        offset = header.data_offset,
        "BMP header"
    );

    let mut image = Image::new(width, height)?;
    let mut row = vec![0u8; width as usize * 3];
    let mut pad = [0u8; 3];
    for file_row in 0..height {
        let y = if header.is_top_down() {
            file_row
        } else {
            height - 1 - file_row
        };

        reader
            .read_exact(&mut row)
            .map_err(|e| ImageError::from_read(e, "pixel data"))?;
        for (x, bgr) in row.chunks_exact(3).enumerate() {
            image.set_pixel(x as i64, y as i64, Color::from_u8(bgr[2], bgr[1], bgr[0]));
        }

        reader
            .read_exact(&mut pad[..padding])
            .map_err(|e| ImageError::from_read(e, "pixel data"))?;
    }

    debug!(elapsed_ms = t0.elapsed().as_millis(), "BMP decode");
    Ok(image)
}

/// Serialize an image as a bottom-up 24-bit BMP.
pub fn encode_to_vec(image: &Image) -> Result<Vec<u8>> {
    let width = image.width();
    let height = image.height();
    let too_large = || ImageError::InvalidDimensions {
        width: width as i64,
        height: height as i64,
    };
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }

    let stride = row_stride(width);
    let pixel_data_size = stride
        .checked_mul(height as usize)
        .filter(|&n| n <= (u32::MAX - PIXEL_DATA_OFFSET) as usize)
        .ok_or_else(too_large)?;
    let file_size = pixel_data_size + PIXEL_DATA_OFFSET as usize;

    let mut out = Vec::with_capacity(file_size);

    // File header
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    let padding = row_padding(width);
    for row in image.pixels().chunks_exact(width as usize).rev() {
        for color in row {
            let [r, g, b] = color.to_u8();
            out.extend_from_slice(&[b, g, r]);
        }
        out.extend(std::iter::repeat_n(0u8, padding));
    }

    Ok(out)
}

/// Write an encoded image to any sink.
pub fn encode_to<W: Write>(mut writer: W, image: &Image) -> Result<()> {
    let bytes = encode_to_vec(image)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Encode to `path`.
///
/// The file is staged in the destination directory and renamed into place,
/// so a failure never leaves a partially written output behind. An existing
/// target keeps its permissions; a new file gets the usual `0o666` minus
/// umask.
pub fn encode(path: impl AsRef<Path>, image: &Image) -> Result<()> {
    let path = path.as_ref();
    info!(
        ?path,
        width = image.width(),
        height = image.height(),
        "encoding BMP"
    );
    let bytes = encode_to_vec(image)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = staging_file(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    debug!(size = bytes.len(), "wrote BMP");
    Ok(())
}

/// Temp file in `dir`. On unix it is created with the same mode a plain
/// `File::create` would get, instead of tempfile's owner-only default.
fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".imagecraft").suffix(".bmp.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    Ok(builder.tempfile_in(dir)?)
}

/// Whether the file starts with the `BM` magic. Reads two bytes.
pub fn has_signature(path: impl AsRef<Path>) -> bool {
    let mut magic = [0u8; 2];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut magic))
        .map(|()| magic == SIGNATURE)
        .unwrap_or(false)
}

/// Read only the headers and return `(width, |height|)`.
pub fn probe(path: impl AsRef<Path>) -> Result<(u32, u32)> {
    let mut file = File::open(path)?;
    BmpHeader::read_from(&mut file)?.dimensions()
}
