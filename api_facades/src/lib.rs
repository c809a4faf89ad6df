//! API Facades Layer
//!
//! Provides the entry points host code calls to move terms in and out of
//! the External Term Format. The facades hold the process-wide type
//! registry and codec configuration and hand each call a snapshot of both.

pub mod etf_facades;

// Re-export main facade functions
pub use etf_facades::*;
