use std::io;

/// Errors from image construction, BMP coding and filter configuration.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid BMP signature (expected 'BM')")]
    BadSignature,

    #[error(
        "unsupported BMP format: {bits_per_pixel}-bit, compression {compression} \
         (only uncompressed 24-bit is supported)"
    )]
    UnsupportedFormat {
        bits_per_pixel: u16,
        compression: u32,
    },

    #[error("truncated BMP file while reading {stage}")]
    TruncatedFile { stage: &'static str },

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("invalid filter parameter: {0}")]
    InvalidFilterParameter(String),

    #[error("invalid recipe: {0}")]
    Recipe(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;

impl ImageError {
    /// Map a read failure, turning a short read into `TruncatedFile`.
    pub(crate) fn from_read(err: io::Error, stage: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ImageError::TruncatedFile { stage }
        } else {
            ImageError::Io(err)
        }
    }

    pub(crate) fn invalid_param(msg: impl Into<String>) -> Self {
        ImageError::InvalidFilterParameter(msg.into())
    }
}
