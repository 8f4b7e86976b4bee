//! Response stream reader
//!
//! Multi-entry server replies announce an entry count in their status
//! line and then stream the entries. Two shapes exist on the wire:
//!
//! - **Block mode** (definitions): each entry is a status-style header
//!   line followed by raw text lines up to a lone `.` terminator.
//! - **Line mode** (catalogs, match lists): each entry is exactly one
//!   line of whitespace/quote-delimited atoms.
//!
//! After its entries, a reply carries a closing status line (and
//! sometimes stray blanks). Both readers finish by draining whatever is
//! already buffered so the connection is ready for the next command.
//!
//! A stream that dies mid-payload is not an error here: the reader stops
//! and reports what it collected, flagged as incomplete. The session
//! logs that and passes the partial results on.

use crate::error::{DictError, Result};
use crate::transport::Transport;

use super::atoms::split_atoms;
use super::status::{is_terminator, StatusLine};
use super::{CODE_DEFINITION_ENTRY, CODE_DEFINITION_ENTRY_ALT};

/// Entries recovered from a multi-entry reply.
///
/// `complete` is false when the stream ended before the declared entry
/// count was satisfied; `entries` then holds everything readable up to
/// that point (possibly including one entry with a truncated body).
#[derive(Debug)]
pub struct Recovered<T> {
    pub entries: Vec<T>,
    pub complete: bool,
}

/// One block-mode entry: the `151`/`131` header and the assembled body
/// (every body line followed by a newline, terminator excluded).
#[derive(Debug)]
pub struct DefinitionBlock {
    pub header: StatusLine,
    pub body: String,
}

/// Read up to `expected` definition blocks.
///
/// Each attempted entry consumes one header line. Headers whose code is
/// not an entry-follows code (151 or 131) are skipped and yield no
/// entry; the attempt still counts against `expected`. A malformed
/// header line is a protocol error: at that point the stream position is
/// unknowable, so the remaining buffered lines are drained and the
/// error returned rather than guessing at block boundaries.
pub fn read_definition_blocks(
    transport: &mut dyn Transport,
    expected: usize,
) -> Result<Recovered<DefinitionBlock>> {
    let mut entries = Vec::new();
    let mut complete = true;

    'outer: for _ in 0..expected {
        let header_line = match transport.read_line() {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => {
                complete = false;
                break;
            }
        };

        let header = match StatusLine::parse(&header_line) {
            Ok(header) => header,
            Err(e) => {
                // Before failing, discard whatever else the reply left
                // buffered so the next command starts on a status line.
                drain(transport);
                return Err(e);
            }
        };
        if header.code != CODE_DEFINITION_ENTRY && header.code != CODE_DEFINITION_ENTRY_ALT {
            continue;
        }

        let mut body = String::new();
        loop {
            match transport.read_line() {
                Ok(Some(line)) if is_terminator(&line) => break,
                Ok(Some(line)) => {
                    body.push_str(&line);
                    body.push('\n');
                }
                Ok(None) | Err(_) => {
                    // Keep the truncated entry; there is nothing left
                    // to read for the remaining ones.
                    entries.push(DefinitionBlock { header, body });
                    complete = false;
                    break 'outer;
                }
            }
        }

        entries.push(DefinitionBlock { header, body });
    }

    drain(transport);
    Ok(Recovered { entries, complete })
}

/// Read up to `expected` single-line entries, each tokenized into atoms.
///
/// Used for database/strategy catalogs and match lists, where the
/// entry's fields are fixed positional atoms.
pub fn read_entry_lines(transport: &mut dyn Transport, expected: usize) -> Recovered<Vec<String>> {
    let mut entries = Vec::new();
    let mut complete = true;

    for _ in 0..expected {
        match transport.read_line() {
            Ok(Some(line)) => entries.push(split_atoms(&line)),
            Ok(None) | Err(_) => {
                complete = false;
                break;
            }
        }
    }

    drain(transport);
    Recovered { entries, complete }
}

/// Discard already-buffered trailing lines (the closing status line and
/// any stray blanks) without blocking for data that has not arrived.
pub fn drain(transport: &mut dyn Transport) {
    while transport.has_buffered() {
        match transport.read_line() {
            Ok(Some(line)) => tracing::trace!("drained: {}", line),
            Ok(None) | Err(_) => break,
        }
    }
}

/// Map an unexpected status at a decision point to a protocol error
/// carrying the server's detail text.
pub(crate) fn unexpected_status(status: &StatusLine) -> DictError {
    DictError::Protocol(format!("unexpected status {}: {}", status.code, status.details))
}
