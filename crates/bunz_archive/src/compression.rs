//! Gzip compression and decompression of whole containers.

use std::fmt;
use std::io::{Read, Write};

use flate2::{bufread::GzDecoder, write::GzEncoder, Compression};
use tracing::{instrument, warn};

use crate::error::{Error, Result};

/// How hard gzip should work when compressing a container
///
/// Valid levels run from 1 (fastest) to 9 (smallest). Anything else falls back to
/// [`CompressionLevel::DEFAULT`] instead of failing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    pub const FASTEST: CompressionLevel = CompressionLevel(1);
    pub const DEFAULT: CompressionLevel = CompressionLevel(9);

    /// Create a level, falling back to the default when `level` is outside 1..=9
    pub fn new(level: u32) -> Self {
        if (1..=9).contains(&level) {
            CompressionLevel(level)
        } else {
            warn!(
                level,
                fallback = Self::DEFAULT.0,
                "compression level out of range"
            );
            Self::DEFAULT
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for CompressionLevel {
    fn from(value: u32) -> Self {
        CompressionLevel::new(value)
    }
}

impl From<CompressionLevel> for Compression {
    fn from(value: CompressionLevel) -> Self {
        Compression::new(value.0)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrap `data` in a single gzip stream
#[instrument(skip(data), err, fields(size = data.len()))]
pub fn compress(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), level.into());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Unwrap a single gzip stream
///
/// Any malformed input, including an empty buffer or bytes after the end of the stream, is
/// reported as [`Error::Decompression`].
#[instrument(skip(data), err, fields(size = data.len()))]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::Decompression(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "empty input",
        )));
    }

    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(Error::Decompression)?;

    let trailing = decoder.into_inner().len();
    if trailing > 0 {
        return Err(Error::Decompression(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{trailing} bytes after the end of the gzip stream"),
        )));
    }

    Ok(out)
}
