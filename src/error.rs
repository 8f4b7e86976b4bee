//! Error types for Glossa
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DictError
pub type Result<T> = std::result::Result<T, DictError>;

/// Unified error type for Glossa operations
#[derive(Debug, Error)]
pub enum DictError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    /// Transport unreachable, handshake rejected, or the stream died
    /// mid-session. Carries the server detail text or the underlying
    /// I/O cause, formatted in.
    #[error("connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Unexpected status code at a decision point, or a malformed
    /// status line. Carries the server-supplied detail text where
    /// available.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl DictError {
    /// Build a `Connection` error from an underlying I/O failure,
    /// keeping the cause in the message.
    pub fn connection(context: &str, source: std::io::Error) -> Self {
        DictError::Connection(format!("{}: {}", context, source))
    }
}
