//! Infrastructure Layer: Bignum Encoding
//!
//! Provides conversion between arbitrary precision integers and the
//! sign + little-endian base-256 magnitude layout of `SMALL_BIG_EXT` (110) and
//! `LARGE_BIG_EXT` (111).
//!
//! ## Overview
//!
//! - **[`bignum_codec`](bignum_codec/index.html)**: `BignumCodec`, magnitude
//!   composition/decomposition and the tagged big integer writer.
//! - **[`common`](common/index.html)**: tags and the `BignumError` type.
//!
//! The decoder reads the length and sign byte itself (through its cursor) and
//! hands the magnitude slice to [`BignumCodec::decode_magnitude`]; the encoder
//! calls [`BignumCodec::encode`] once it has decided a value does not fit
//! `INTEGER_EXT`.
//!
//! ## See Also
//!
//! - [`entities_utilities`](../../entities/entities_utilities/index.html): BigNumber
//! - [`infrastructure_external_format`](../infrastructure_external_format/index.html): Term codec

pub mod bignum_codec;
pub mod common;

pub use bignum_codec::BignumCodec;
pub use common::{BignumError, LARGE_BIG_EXT, SMALL_BIG_EXT};
