//! Infrastructure Layer: Utilities
//!
//! Provides helper functionality shared by the codec infrastructure.
//!
//! ## Modules
//!
//! - **[`compression`](compression/index.html)**: zlib compression and bounded
//!   decompression backing `COMPRESSED` (tag 80) terms.

pub mod compression;

pub use compression::{compress, decompress, CompressionError, CompressionLevel};
