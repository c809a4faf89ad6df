//! Constants Module
//!
//! Tag bytes of the External Term Format.

/// Version magic byte leading every uncompressed payload
pub const VERSION_MAGIC: u8 = 131;

/// NEW_FLOAT_EXT: 8-byte big-endian IEEE-754 double
pub const NEW_FLOAT_EXT: u8 = 70;
/// BIT_BINARY_EXT: 4-byte length, 1-byte trailing bit count, bytes
pub const BIT_BINARY_EXT: u8 = 77;
/// COMPRESSED: 4-byte uncompressed size, zlib stream
pub const COMPRESSED: u8 = 80;
/// NEW_PID_EXT: node atom, id, serial, creation
pub const NEW_PID_EXT: u8 = 88;
/// NEWER_REFERENCE_EXT: 2-byte id count, node atom, creation, ids
pub const NEWER_REFERENCE_EXT: u8 = 90;
/// SMALL_INTEGER_EXT: unsigned byte
pub const SMALL_INTEGER_EXT: u8 = 97;
/// INTEGER_EXT: 4-byte big-endian signed
pub const INTEGER_EXT: u8 = 98;
/// ATOM_EXT: 2-byte length, Latin-1 (deprecated)
pub const ATOM_EXT: u8 = 100;
/// SMALL_TUPLE_EXT: 1-byte arity
pub const SMALL_TUPLE_EXT: u8 = 104;
/// LARGE_TUPLE_EXT: 4-byte arity
pub const LARGE_TUPLE_EXT: u8 = 105;
/// NIL_EXT: the empty list
pub const NIL_EXT: u8 = 106;
/// STRING_EXT: 2-byte length, bytes read as small integers
pub const STRING_EXT: u8 = 107;
/// LIST_EXT: 4-byte length, elements, tail
pub const LIST_EXT: u8 = 108;
/// BINARY_EXT: 4-byte length, bytes
pub const BINARY_EXT: u8 = 109;
/// SMALL_ATOM_EXT: 1-byte length, Latin-1 (deprecated)
pub const SMALL_ATOM_EXT: u8 = 115;
/// MAP_EXT: 4-byte pair count, pairs
pub const MAP_EXT: u8 = 116;
/// ATOM_UTF8_EXT: 2-byte length, UTF-8
pub const ATOM_UTF8_EXT: u8 = 118;
/// SMALL_ATOM_UTF8_EXT: 1-byte length, UTF-8
pub const SMALL_ATOM_UTF8_EXT: u8 = 119;

pub use infrastructure_bignum_encoding::{LARGE_BIG_EXT, SMALL_BIG_EXT};

/// Longest byte list `STRING_EXT` can carry
pub const MAX_STRING_EXT_LEN: usize = u16::MAX as usize;

/// Pre-encoded `__struct__` key: SMALL_ATOM_UTF8_EXT, length 10, name
pub const STRUCT_MARKER_BYTES: &[u8] = b"\x77\x0a__struct__";
