//! Bits Module
//!
//! Provides `BitString`, a byte string whose last byte is only partially used
//! (`BIT_BINARY_EXT`).

use crate::error::DataError;

/// Byte string with a trailing partial byte
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    trailing_bits: u8,
}

impl BitString {
    /// Create a bit string
    ///
    /// # Arguments
    /// * `bytes` - Raw bytes, the last one partially used
    /// * `trailing_bits` - Bits used in the last byte, `0..8`
    ///
    /// # Returns
    /// * `Ok(BitString)` - Valid bit count
    /// * `Err(DataError::InvalidBitCount)` - `trailing_bits >= 8`
    pub fn new(bytes: Vec<u8>, trailing_bits: u8) -> Result<Self, DataError> {
        if trailing_bits >= 8 {
            return Err(DataError::InvalidBitCount(trailing_bits));
        }
        Ok(Self {
            bytes,
            trailing_bits,
        })
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bits used in the last byte
    pub fn trailing_bits(&self) -> u8 {
        self.trailing_bits
    }

    /// Total length in bits
    pub fn bit_len(&self) -> usize {
        if self.trailing_bits == 0 || self.bytes.is_empty() {
            self.bytes.len() * 8
        } else {
            (self.bytes.len() - 1) * 8 + self.trailing_bits as usize
        }
    }

    /// Consume into the raw bytes and the trailing bit count
    pub fn into_parts(self) -> (Vec<u8>, u8) {
        (self.bytes, self.trailing_bits)
    }
}
