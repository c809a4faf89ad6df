//! Buffer Module
//!
//! Provides the append-only byte sink the encoder writes into. Multi-byte
//! integers are written big-endian, as everywhere in the External Term Format
//! except bignum magnitudes (those are produced already ordered by the bignum
//! codec and appended with [`OutputBuffer::put_slice`]).

/// Append-only output buffer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with `capacity` bytes reserved
    ///
    /// The reservation is a hint; writing past it simply grows the buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Reserve room for at least `additional` more bytes
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Append one byte
    pub fn put_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Append a big-endian u16
    pub fn put_u16_be(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian u32
    pub fn put_u32_be(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian i32
    pub fn put_i32_be(&mut self, value: i32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian IEEE-754 double
    pub fn put_f64_be(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Append raw bytes
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
