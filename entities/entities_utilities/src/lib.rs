//! Entities Layer: Utilities
//!
//! Provides the arbitrary precision integer type shared by the term data model
//! and the bignum codec.
//!
//! ## Overview
//!
//! The `entities_utilities` crate is the innermost layer of the codec workspace.
//! It has no knowledge of the wire format; it only wraps `malachite::Integer`
//! behind a small API that the outer layers need:
//!
//! - Construction from machine integers and from decimal strings
//! - Narrowing back to `i64` / `i32` when the value fits
//! - Sign inspection and absolute value
//!
//! ## See Also
//!
//! - [`entities_data_handling`](../entities_data_handling/index.html): Term data model
//! - [`infrastructure_bignum_encoding`](../../infrastructure/infrastructure_bignum_encoding/index.html): Sign/magnitude codec

pub mod big;

pub use big::BigNumber;
