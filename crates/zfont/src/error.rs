use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("signature does not match {0}")]
    FormatMismatch(&'static str),
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("unexpected end of data while reading {what}")]
    Truncated { what: &'static str },
    #[error("unsupported font format")]
    UnsupportedFormat,
    #[error("crc mismatch in {chunk} chunk: stored {found:#010x}, computed {expected:#010x}")]
    ChunkCrcMismatch {
        chunk: String,
        expected: u32,
        found: u32,
    },
    #[error("raster size mismatch: expected {expected} pixels, got {found}")]
    InvalidRaster { expected: usize, found: usize },
    #[error("archive error: {0}")]
    Archive(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
