//! Compression Module
//!
//! Provides the zlib (RFC 1950) compression used by compressed terms. Erlang's
//! `term_to_binary(Term, [compressed])` wraps the encoded term in a zlib stream,
//! so both directions here use `flate2`'s zlib encoder/decoder rather than raw
//! deflate.
//!
//! ## Usage
//!
//! ```rust
//! use infrastructure_utilities::compression::{compress, decompress, CompressionLevel};
//!
//! let data = b"Hello, world!";
//! let compressed = compress(data, CompressionLevel::Default).unwrap();
//! let restored = decompress(&compressed, data.len()).unwrap();
//! assert_eq!(&restored, data);
//! ```

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};

/// Compression level enumeration matching zlib levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression (0)
    None = 0,
    /// Best speed (1)
    BestSpeed = 1,
    /// Default compression (6)
    #[default]
    Default = 6,
    /// Best compression (9)
    BestCompression = 9,
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::None => Compression::none(),
            CompressionLevel::BestSpeed => Compression::fast(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::BestCompression => Compression::best(),
        }
    }
}

impl From<i32> for CompressionLevel {
    fn from(level: i32) -> Self {
        match level {
            n if n <= 0 => CompressionLevel::None,
            1..=3 => CompressionLevel::BestSpeed,
            4..=7 => CompressionLevel::Default,
            _ => CompressionLevel::BestCompression,
        }
    }
}

/// Compression error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// Data error (corrupted or not a zlib stream)
    DataError(String),
    /// Decompressed output exceeded the caller's limit
    LimitExceeded(usize),
    /// Stream error while compressing
    StreamError(String),
    /// Input ended before the zlib stream was complete
    Truncated,
}

impl std::fmt::Display for CompressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionError::DataError(msg) => write!(f, "Data error: {}", msg),
            CompressionError::LimitExceeded(limit) => {
                write!(f, "Decompressed data exceeds {} bytes", limit)
            }
            CompressionError::StreamError(msg) => write!(f, "Stream error: {}", msg),
            CompressionError::Truncated => write!(f, "Incomplete zlib stream"),
        }
    }
}

impl std::error::Error for CompressionError {}

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;

/// Compress `source` into a zlib stream
///
/// # Arguments
/// * `source` - Data to compress
/// * `level` - Compression level
///
/// # Returns
/// * `Ok(Vec<u8>)` - Compressed bytes
/// * `Err(CompressionError)` - Stream error
pub fn compress(source: &[u8], level: CompressionLevel) -> CompressionResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(source.len() / 2 + 16), level.into());
    encoder
        .write_all(source)
        .map_err(|e| CompressionError::StreamError(format!("Write error: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| CompressionError::StreamError(format!("Finish error: {}", e)))
}

/// Decompress a zlib stream, reading at most `limit` bytes of output
///
/// Output past `limit` is never inflated; the caller gets `LimitExceeded`
/// after one extra byte.
///
/// # Arguments
/// * `source` - zlib stream
/// * `limit` - Maximum number of decompressed bytes accepted
///
/// # Returns
/// * `Ok(Vec<u8>)` - Decompressed bytes (at most `limit`)
/// * `Err(CompressionError::Truncated)` - Stream ends early
/// * `Err(CompressionError)` - Corrupt stream or output over the limit
pub fn decompress(source: &[u8], limit: usize) -> CompressionResult<Vec<u8>> {
    let decoder = ZlibDecoder::new(source);
    let cap = (limit as u64).saturating_add(1);
    let mut output = Vec::with_capacity(limit.min(source.len().saturating_mul(4)));
    decoder
        .take(cap)
        .read_to_end(&mut output)
        .map_err(read_error)?;
    if output.len() > limit {
        return Err(CompressionError::LimitExceeded(limit));
    }
    Ok(output)
}

/// flate2 reports a stream cut short as an unexpected EOF or as an
/// "incomplete deflate stream" error
fn read_error(err: io::Error) -> CompressionError {
    if err.kind() == io::ErrorKind::UnexpectedEof || err.to_string().contains("incomplete") {
        CompressionError::Truncated
    } else {
        CompressionError::DataError(err.to_string())
    }
}
