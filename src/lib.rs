//! # LineKV
//!
//! A minimal durable key-value store backed by one text file:
//! - Delimiter-safe base64 encoding of arbitrary key/value bytes
//! - One `key=value` record per line, at most one record per key
//! - fsync after every write
//! - Presence set rebuilt from the file on every call
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              SharedStore (optional, Mutex)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Store                                  │
//! │          get / set / delete / close (&mut self)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │ PresenceSet │
//!   │  (base64)   │          │  (derived)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │ rebuilt from
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  StoreFile  │
//!                           │ (key=value) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod storage;
pub mod engine;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LineKvError, Result};
pub use config::{Config, ParsePolicy, RewriteStrategy, SyncStrategy};
pub use engine::Store;
pub use shared::SharedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LineKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
