//! Data Error Module
//!
//! Errors raised while constructing term values.

use std::fmt;

/// Errors raised by term constructors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Atom name exceeds the 65535 byte limit of `ATOM_UTF8_EXT`
    AtomTooLong(usize),
    /// Atom name is not valid UTF-8
    InvalidUtf8,
    /// Trailing bit count outside `0..8`
    InvalidBitCount(u8),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::AtomTooLong(len) => {
                write!(f, "atom name is {} bytes, at most 65535 are allowed", len)
            }
            DataError::InvalidUtf8 => write!(f, "atom name is not valid UTF-8"),
            DataError::InvalidBitCount(bits) => {
                write!(f, "trailing bit count {} is outside 0..8", bits)
            }
        }
    }
}

impl std::error::Error for DataError {}
