//! Common Bignum Definitions
//!
//! Tags and errors shared by the bignum codec.
//!
//! ## Encoding Format
//!
//! - **SMALL_BIG_EXT** (tag 110): 1 byte tag + 1 byte n + 1 byte sign + n bytes (little-endian)
//! - **LARGE_BIG_EXT** (tag 111): 1 byte tag + 4 bytes n (big-endian) + 1 byte sign + n bytes (little-endian)

use std::fmt;

/// Tag of a big integer with a 1-byte magnitude length
pub const SMALL_BIG_EXT: u8 = 110;

/// Tag of a big integer with a 4-byte magnitude length
pub const LARGE_BIG_EXT: u8 = 111;

/// Bignum encoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BignumError {
    /// Magnitude length does not fit the 4-byte length field
    ValueTooLarge(usize),
}

impl fmt::Display for BignumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BignumError::ValueTooLarge(len) => write!(
                f,
                "bignum magnitude of {} bytes does not fit a 32-bit length",
                len
            ),
        }
    }
}

impl std::error::Error for BignumError {}
