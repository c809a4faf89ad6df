//! Infrastructure Layer: External Term Format
//!
//! Provides the codec between the host term model and Erlang's External Term
//! Format (ETF), the byte format produced by `erlang:term_to_binary/1` and
//! read by `erlang:binary_to_term/1`.
//!
//! ## Overview
//!
//! Every payload starts with the version byte (131), followed either by one
//! tagged term or by a `COMPRESSED` envelope holding a zlib stream of one.
//! Module atoms (`Elixir.Foo.Bar`) map to host type names (`Foo::Bar`), and
//! maps keyed by `__struct__` carry typed records across the boundary.
//!
//! ## Modules
//!
//! - **[`decoding`](decoding/index.html)**: bytes to terms
//!   (decode, decode_with_config, Decoder)
//!
//! - **[`encoding`](encoding/index.html)**: terms to bytes
//!   (encode, encode_with_config, encode_term_into)
//!
//! - **[`size_calculation`](size_calculation/index.html)**: encoded size of a term
//!
//! - **[`registry`](registry/index.html)**: host types known to the decoder
//!
//! - **[`cursor`](cursor/index.html)**, **[`config`](config/index.html)**,
//!   **[`constants`](constants/index.html)**, **[`error`](error/index.html)**
//!
//! ## Architecture
//!
//! It depends on:
//! - `entities_data_handling` for the term model and the output buffer
//! - `infrastructure_bignum_encoding` for arbitrary precision integers
//! - `infrastructure_utilities` for zlib compression
//!
//! ## See Also
//!
//! - [`api_facades`](../../api_facades/index.html): process-wide registry and
//!   the `load`/`dump` entry points

pub mod config;
pub mod constants;
pub mod cursor;
pub mod decoding;
pub mod encoding;
pub mod error;
pub mod registry;
pub mod size_calculation;

pub use config::{ByteListMode, CodecConfig, DEFAULT_MAX_DEPTH};
pub use constants::VERSION_MAGIC;
pub use cursor::ByteCursor;
pub use decoding::{decode, decode_with_config, Decoder};
pub use encoding::{encode, encode_term_into, encode_with_config};
pub use error::{CodecError, CodecResult};
pub use registry::{EmptyRegistry, StructDecoder, StructRegistry, StructRegistryBuilder, TypeRegistry};
pub use size_calculation::{encoded_size, encoded_size_with_depth};
