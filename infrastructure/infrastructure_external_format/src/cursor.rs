//! Cursor Module
//!
//! Provides `ByteCursor`, the bounds-checked big-endian reader the decoder
//! walks the input with. A failed read leaves the offset where it was.

use crate::error::{CodecError, CodecResult};

/// Read-only view of the input plus the current offset
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Borrow the next `n` bytes and advance past them
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(CodecError::TruncatedInput {
                offset: self.offset,
                needed: n,
                available,
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.buf[start..start + n])
    }

    /// Borrow every remaining byte
    pub fn rest(&mut self) -> &'a [u8] {
        let start = self.offset;
        self.offset = self.buf.len();
        &self.buf[start..]
    }

    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_be(&mut self) -> CodecResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32_be(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_i32_be(&mut self) -> CodecResult<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Reinterpret 8 big-endian bytes as an IEEE-754 double
    pub fn read_f64_be(&mut self) -> CodecResult<f64> {
        self.read_array().map(f64::from_be_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance() {
        let data = [1, 0, 2, 0, 0, 0, 3, 0xFF, 0xFF, 0xFF, 0xFE];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_eq!(cursor.read_u16_be().unwrap(), 2);
        assert_eq!(cursor.read_u32_be().unwrap(), 3);
        assert_eq!(cursor.read_i32_be().unwrap(), -2);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_failed_read_keeps_offset() {
        let data = [1, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_u8().unwrap();
        assert_eq!(
            cursor.read_u32_be(),
            Err(CodecError::TruncatedInput {
                offset: 1,
                needed: 4,
                available: 2
            })
        );
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.read_bytes(2).unwrap(), &[2, 3]);
    }

    #[test]
    fn test_f64_bit_exact() {
        let bits = 0x4009_21FB_5444_2D18u64; // pi
        let data = bits.to_be_bytes();
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_f64_be().unwrap().to_bits(), bits);
    }

    #[test]
    fn test_rest() {
        let data = [9, 8, 7];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_u8().unwrap();
        assert_eq!(cursor.rest(), &[8, 7]);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn test_empty_buffer() {
        let mut cursor = ByteCursor::new(&[]);
        assert!(matches!(
            cursor.read_u8(),
            Err(CodecError::TruncatedInput { offset: 0, needed: 1, available: 0 })
        ));
    }
}
