//! Error types for adsbridge
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type for adsbridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid request: {0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Type / Codec Errors
    // -------------------------------------------------------------------------
    #[error("Type '{0}' not supported")]
    UnsupportedType(String),

    #[error("Cannot parse '{value}' as {expected}")]
    Parse { expected: &'static str, value: String },

    #[error("Type mismatch: token requires {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("String of {got} bytes does not fit a slot of capacity {capacity}")]
    StringOverflow { capacity: usize, got: usize },

    #[error("Array length in 'values' ({supplied}) doesn't match the declared array length in 'types' ({declared})")]
    LengthMismatch { supplied: usize, declared: usize },

    #[error("Codec error: {0}")]
    Codec(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
