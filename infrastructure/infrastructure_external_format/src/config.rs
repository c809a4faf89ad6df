//! Config Module
//!
//! Provides `CodecConfig`, the knobs shared by the encoder and decoder.

use entities_data_handling::NamespaceTranslator;
use infrastructure_utilities::CompressionLevel;

/// Default maximum nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How `STRING_EXT` (tag 107) payloads are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteListMode {
    /// `Term::ByteList`: a list of small integers, as Erlang defines it
    #[default]
    Integers,
    /// `Term::Binary`: the raw bytes, for peers that treat 107 as text
    Binary,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Deepest nesting accepted by the decoder and the encoder
    pub max_depth: usize,
    /// Decoding of tag 107
    pub byte_list_mode: ByteListMode,
    /// zlib level used when encoding with compression
    pub compression_level: CompressionLevel,
    /// Module atom <-> host type name convention
    pub namespace: NamespaceTranslator,
    /// Ignore bytes after the top-level term; strict decoders set this to
    /// false to fail with `TrailingBytes`
    pub allow_trailing_bytes: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            byte_list_mode: ByteListMode::default(),
            compression_level: CompressionLevel::default(),
            namespace: NamespaceTranslator::default(),
            allow_trailing_bytes: true,
        }
    }
}

impl CodecConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_byte_list_mode(mut self, mode: ByteListMode) -> Self {
        self.byte_list_mode = mode;
        self
    }

    pub fn with_compression_level(mut self, level: CompressionLevel) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_namespace(mut self, namespace: NamespaceTranslator) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}
