//! Status line parser
//!
//! Every server reply begins with a status line: a 3-digit numeric code,
//! one space, and free-form detail text. The detail text carries entry
//! counts for multi-line replies and human-readable error messages for
//! rejections.

use crate::error::{DictError, Result};
use crate::transport::Transport;

/// The line that terminates a multi-line payload
const TERMINATOR: &str = ".";

/// True iff `line` is the multi-line payload terminator (exactly `.`)
pub fn is_terminator(line: &str) -> bool {
    line == TERMINATOR
}

/// A parsed server status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// 3-digit status code
    pub code: u16,

    /// Remainder of the line after the code and one separating space
    /// (empty if nothing follows the code)
    pub details: String,
}

impl StatusLine {
    /// Parse a status line.
    ///
    /// The leading whitespace-delimited token must be a 3-digit integer;
    /// anything else is a protocol error.
    pub fn parse(line: &str) -> Result<Self> {
        let token = line.split_whitespace().next().unwrap_or("");

        if token.len() != 3 || !token.chars().all(|c| c.is_ascii_digit()) {
            return Err(DictError::Protocol(format!(
                "malformed status line: {:?}",
                line
            )));
        }

        // Token is three ASCII digits, so this cannot fail.
        let code: u16 = token.parse().map_err(|_| {
            DictError::Protocol(format!("malformed status line: {:?}", line))
        })?;

        let rest = &line[line.find(token).unwrap_or(0) + token.len()..];
        let details = rest.strip_prefix(' ').unwrap_or(rest).to_string();

        Ok(Self { code, details })
    }

    /// Read and parse one status line from the transport.
    ///
    /// A closed stream where a status line was expected is a protocol
    /// error; a failed read is a connection error.
    pub fn read_from(transport: &mut dyn Transport) -> Result<Self> {
        let line = transport
            .read_line()
            .map_err(|e| DictError::connection("failed to read status line", e))?
            .ok_or_else(|| {
                DictError::Protocol("stream closed while awaiting a status line".to_string())
            })?;

        Self::parse(&line)
    }

    /// Parse the leading integer of the detail text (the entry count
    /// announced by 110/111/150/152 replies).
    pub fn leading_count(&self) -> Result<usize> {
        self.details
            .split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| {
                DictError::Protocol(format!(
                    "expected an entry count, got {:?}",
                    self.details
                ))
            })
    }
}
