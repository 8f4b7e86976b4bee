//! Protocol Module
//!
//! Parsing for the DICT wire protocol (RFC 2229 style).
//!
//! ## Wire Format
//!
//! ### Commands (client to server, one line each)
//! ```text
//! DEFINE <db> <word-or-"quoted phrase">
//! MATCH <db> <strategy> <word-or-"quoted phrase">
//! SHOW DB
//! SHOW STRAT
//! QUIT
//! ```
//!
//! ### Status Lines (server to client)
//! ```text
//! <3-digit-code><space><free text>
//! ```
//!
//! ### Multi-line Payloads
//! Raw text lines terminated by a line consisting of exactly `.`
//!
//! ### Status Codes
//! - 220: server ready (greeting)
//! - 110: databases follow
//! - 111: strategies follow
//! - 150: definitions follow
//! - 151/131: one definition entry follows
//! - 152: matches follow
//! - 552: no definitions / no matches
//! - 554: no databases present
//! - 555: no strategies available

mod atoms;
mod status;
mod reader;

pub use atoms::split_atoms;
pub use status::{is_terminator, StatusLine};
pub use reader::{drain, read_definition_blocks, read_entry_lines, DefinitionBlock, Recovered};
pub(crate) use reader::unexpected_status;

// =============================================================================
// Status Codes
// =============================================================================

/// Server ready for commands (greeting line)
pub const CODE_READY: u16 = 220;

/// Database list follows
pub const CODE_DATABASES_FOLLOW: u16 = 110;

/// Strategy list follows
pub const CODE_STRATEGIES_FOLLOW: u16 = 111;

/// Definition list follows
pub const CODE_DEFINITIONS_FOLLOW: u16 = 150;

/// One definition entry follows (151; 131 is sent by some servers)
pub const CODE_DEFINITION_ENTRY: u16 = 151;

/// Alternate definition-entry code seen in the wild
pub const CODE_DEFINITION_ENTRY_ALT: u16 = 131;

/// Match list follows
pub const CODE_MATCHES_FOLLOW: u16 = 152;

/// No definitions found / no matches found
pub const CODE_NO_MATCH: u16 = 552;

/// No databases present on this server
pub const CODE_NO_DATABASES: u16 = 554;

/// No strategies available on this server
pub const CODE_NO_STRATEGIES: u16 = 555;
