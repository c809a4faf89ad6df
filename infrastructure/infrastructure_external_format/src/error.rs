//! Error Module
//!
//! Provides `CodecError`, the single error type returned by every encode and
//! decode entry point. Every variant is terminal for the call that produced
//! it: decoding returns no partial term and encoding returns no bytes.

use entities_data_handling::{DataError, ObjectError};
use infrastructure_bignum_encoding::BignumError;
use infrastructure_utilities::CompressionError;

/// Codec errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Buffer exhausted before a field could be read
    #[error("truncated input: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// First byte is not the version magic (131)
    #[error("malformed ETF: expected version byte 131, found {0}")]
    MalformedHeader(u8),

    /// Tag byte not in the supported tag table
    #[error("unknown or unimplemented tag: {0}")]
    UnknownTag(u8),

    /// A known tag appeared where another kind of term was required
    #[error("expected {expected}, found tag {found}")]
    UnexpectedTag { expected: &'static str, found: u8 },

    /// Decompressed length disagrees with the declared size
    ///
    /// When the stream inflates past the declared size, `actual` is
    /// `expected + 1`: inflation stops there.
    #[error("decompressed data is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Length, count or arity does not fit its wire field
    #[error("{what} of {len} does not fit its length field")]
    ValueTooLarge { what: &'static str, len: usize },

    /// Atom longer than 255 characters
    #[error("atom is {0} characters long, at most 255 can be encoded")]
    AtomTooLong(usize),

    /// Value has no type name to put in `__struct__`
    #[error("cannot encode an anonymous type")]
    AnonymousType,

    /// Translated type name longer than 255 characters
    #[error("type name is {0} characters long once prefixed, at most 255 can be encoded")]
    NameTooLong(usize),

    /// NaN or infinity
    #[error("only finite floats can be encoded, got {0}")]
    NonFiniteFloat(f64),

    /// Value with no term mapping and no object capability
    #[error("unsupported value for encoding: {0}")]
    UnsupportedValue(String),

    /// Atom bytes are not valid in their declared encoding
    #[error("invalid atom: {0}")]
    InvalidAtom(String),

    /// Bit-binary trailing bit count outside 0..8
    #[error("invalid trailing bit count: {0}")]
    InvalidBitCount(u8),

    /// Nesting deeper than the configured limit
    #[error("term nesting exceeds the limit of {0}")]
    DepthLimitExceeded(usize),

    /// Bytes left after the top-level term
    #[error("{0} trailing bytes after term")]
    TrailingBytes(usize),

    /// A registered struct decoder rejected its map
    #[error("failed to decode struct {type_name}: {reason}")]
    StructDecode { type_name: String, reason: String },

    /// An object's own encoding failed
    #[error("object encoding failed: {0}")]
    Object(#[from] ObjectError),

    /// zlib failure
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

impl From<BignumError> for CodecError {
    fn from(err: BignumError) -> Self {
        match err {
            BignumError::ValueTooLarge(len) => CodecError::ValueTooLarge {
                what: "bignum magnitude",
                len,
            },
        }
    }
}

impl From<DataError> for CodecError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidBitCount(bits) => CodecError::InvalidBitCount(bits),
            other => CodecError::InvalidAtom(other.to_string()),
        }
    }
}

/// Narrow a length to a 32-bit wire field
pub(crate) fn checked_u32(len: usize, what: &'static str) -> CodecResult<u32> {
    u32::try_from(len).map_err(|_| CodecError::ValueTooLarge { what, len })
}

/// Narrow a length to a 16-bit wire field
pub(crate) fn checked_u16(len: usize, what: &'static str) -> CodecResult<u16> {
    u16::try_from(len).map_err(|_| CodecError::ValueTooLarge { what, len })
}
