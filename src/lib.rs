//! # adsbridge
//!
//! A symbolic batch read/write bridge for ADS-style automation controllers:
//! - Type-token driven binary codec (scalars, fixed-length strings, arrays, structs)
//! - Fail-fast batch request processing with per-variable error reporting
//! - Scoped handle/buffer lifecycle per item (one handle, one buffer, one item)
//! - Pluggable transport gateway and observability sink
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Batch Request (JSON)                      │
//! │          names / types / request_type / values               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  RequestProcessor                            │
//! │        (validate → per-item dispatch, fail-fast)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │   Gateway   │
//!   │ token/value │          │  (handles)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod events;
pub mod gateway;
pub mod codec;
pub mod request;
pub mod processor;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BridgeError, Result};
pub use config::Config;
pub use gateway::{ConnectionGateway, Handle, MemoryGateway};
pub use processor::RequestProcessor;
pub use request::{BatchRequest, BatchResponse, RequestType};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of adsbridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
