//! # Glossa
//!
//! A synchronous client for the DICT dictionary lookup protocol
//! (RFC 2229 style) with:
//! - Typed results (definitions, match lists, database/strategy catalogs)
//! - Strict status-code handling with typed errors
//! - A lazily populated, memoized database catalog per connection
//! - Whole-operation locking so one connection is safe to share
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                               │
//! │        (command dispatch, catalog cache, locking)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Response Stream Reader                       │
//! │           (block mode / line mode / drain)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ StatusLine  │          │ split_atoms │
//!   │  (parser)   │          │ (tokenizer) │
//!   └─────────────┘          └─────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Transport                               │
//! │        (buffered line I/O over one TcpStream)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod transport;
pub mod protocol;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DictError, Result};
pub use config::Config;
pub use model::{Database, Definition, MatchingStrategy};
pub use session::Session;
pub use transport::{TcpTransport, Transport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Glossa
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
