//! ETF Facades
//!
//! Process-wide decode/encode entry points.
//!
//! The registry and configuration are installed once at startup and read on
//! every call. Replacement is guarded by a reader-writer lock; calls already
//! running keep the snapshot they started with.

use std::sync::{Arc, PoisonError, RwLock};

use entities_data_handling::Term;
use infrastructure_external_format::{
    decode_with_config, encode_with_config, CodecConfig, CodecResult, EmptyRegistry, TypeRegistry,
};
use tracing::info;

lazy_static::lazy_static! {
    static ref TYPE_REGISTRY: RwLock<Arc<dyn TypeRegistry>> = RwLock::new(Arc::new(EmptyRegistry));
    static ref CODEC_CONFIG: RwLock<Arc<CodecConfig>> = RwLock::new(Arc::new(CodecConfig::default()));
}

/// Replace the process-wide type registry
pub fn install_registry(registry: Arc<dyn TypeRegistry>) {
    let mut slot = TYPE_REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    *slot = registry;
    info!("installed type registry");
}

/// Go back to a registry that knows no types
pub fn reset_registry() {
    install_registry(Arc::new(EmptyRegistry));
}

/// Replace the process-wide codec configuration
pub fn install_config(config: CodecConfig) {
    let mut slot = CODEC_CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Arc::new(config);
    info!("installed codec configuration");
}

/// Snapshot of the installed registry
pub fn registry() -> Arc<dyn TypeRegistry> {
    TYPE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Snapshot of the installed configuration
pub fn config() -> Arc<CodecConfig> {
    CODEC_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Decode a versioned payload
pub fn decode(bytes: &[u8]) -> CodecResult<Term> {
    decode_with(bytes, false)
}

/// Decode a payload, optionally one that starts directly at a tag
pub fn decode_with(bytes: &[u8], skip_version_check: bool) -> CodecResult<Term> {
    let registry = registry();
    let config = config();
    decode_with_config(bytes, skip_version_check, &*registry, &config)
}

/// Encode a term, optionally zlib-compressed
pub fn encode(term: &Term, compress: bool) -> CodecResult<Vec<u8>> {
    encode_with_config(term, compress, &config())
}

/// Alias of [`decode`]
pub fn load(bytes: &[u8]) -> CodecResult<Term> {
    decode(bytes)
}

/// Alias of [`decode`]
pub fn deserialize(bytes: &[u8]) -> CodecResult<Term> {
    decode(bytes)
}

/// Alias of [`encode`]
pub fn dump(term: &Term, compress: bool) -> CodecResult<Vec<u8>> {
    encode(term, compress)
}

/// Alias of [`encode`]
pub fn serialize(term: &Term, compress: bool) -> CodecResult<Vec<u8>> {
    encode(term, compress)
}
