//! Command session
//!
//! The session owns one DICT connection end to end: handshake, command
//! dispatch, the memoized database catalog, and graceful shutdown.
//!
//! ## Concurrency Model: Whole-Operation Locking
//!
//! The protocol is strictly request-then-response on a single stream; a
//! half-read response corrupts the stream for the next command. Every
//! public operation therefore holds one mutex for its entire
//! request/response exchange (catalog included), not per read or write.
//! Operations block the calling thread for the duration of network I/O.
//!
//! ## Catalog
//!
//! `SHOW DB` results are cached on first need and never refreshed for
//! the life of the connection. A server whose catalog changes
//! mid-session will not be reflected.

use std::fmt;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{DictError, Result};
use crate::model::{Database, Definition, MatchingStrategy};
use crate::protocol::{
    read_definition_blocks, read_entry_lines, split_atoms, unexpected_status, StatusLine,
    CODE_DATABASES_FOLLOW, CODE_DEFINITIONS_FOLLOW, CODE_MATCHES_FOLLOW, CODE_NO_DATABASES,
    CODE_NO_MATCH, CODE_NO_STRATEGIES, CODE_READY, CODE_STRATEGIES_FOLLOW,
};
use crate::transport::{TcpTransport, Transport};

/// A live DICT session over a single connection.
///
/// Safe to share between threads: callers serialize on an internal lock,
/// one operation at a time against the shared stream.
pub struct Session {
    inner: Mutex<Inner>,
}

/// Everything the lock protects: the stream cursors and the catalog
struct Inner {
    transport: Box<dyn Transport + Send>,
    catalog: Vec<Database>,
}

impl Session {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Connect to the server named by the config and perform the
    /// greeting handshake.
    pub fn connect(config: &Config) -> Result<Self> {
        let transport = TcpTransport::connect(config)
            .map_err(|e| DictError::connection("failed to connect", e))?;
        Self::handshake(transport)
    }

    /// Connect to a host on the default DICT port (2628)
    pub fn connect_host(host: impl Into<String>) -> Result<Self> {
        Self::connect(&Config::for_host(host))
    }

    /// Perform the greeting handshake over an established transport.
    ///
    /// The first server line must carry status 220; anything else aborts
    /// the open with a connection error carrying the server detail text.
    pub fn handshake<T: Transport + Send + 'static>(mut transport: T) -> Result<Self> {
        let greeting = StatusLine::read_from(&mut transport).map_err(|e| match e {
            // Anything that goes wrong before the session exists is a
            // failure to connect, whatever layer it came from.
            DictError::Protocol(msg) | DictError::Connection(msg) => DictError::Connection(msg),
        })?;

        if greeting.code != CODE_READY {
            return Err(DictError::Connection(greeting.details));
        }

        tracing::debug!("Session established: {}", greeting.details);

        Ok(Self {
            inner: Mutex::new(Inner {
                transport: Box::new(transport),
                catalog: Vec::new(),
            }),
        })
    }

    /// Send `QUIT` and close the connection, best-effort.
    ///
    /// Never fails: any error while sending the command, reading the
    /// server's closing status, or closing the transport is swallowed.
    /// Safe to call on an already-closed session.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if !inner.transport.is_connected() {
            return;
        }

        tracing::debug!("Closing session");
        let _ = inner.transport.write_line("QUIT");
        let _ = inner.transport.read_line();
        let _ = inner.transport.close();
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Retrieve all definitions for `word` from `database`.
    ///
    /// The database may be one of the server specials: `*` (all
    /// databases) or `!` (first database with a definition). Populates
    /// the catalog first if it is empty, so definition headers can be
    /// resolved to full descriptors.
    ///
    /// Status 552 yields an empty vec, not an error.
    pub fn define(&self, word: &str, database: &Database) -> Result<Vec<Definition>> {
        let mut inner = self.inner.lock();
        inner.fetch_catalog()?;

        let command = format!("DEFINE {} {}", database.name, quote_phrase(word));
        let status = inner.exchange(&command)?;

        match status.code {
            CODE_NO_MATCH => Ok(Vec::new()),
            CODE_DEFINITIONS_FOLLOW => {
                let count = status.leading_count()?;
                let recovered = read_definition_blocks(inner.transport.as_mut(), count)?;
                if !recovered.complete {
                    tracing::warn!(
                        "stream ended early: recovered {} of {} definitions",
                        recovered.entries.len(),
                        count
                    );
                }

                let mut definitions = Vec::with_capacity(recovered.entries.len());
                for block in recovered.entries {
                    let atoms = split_atoms(&block.header.details);
                    let (Some(headword), Some(db_name)) = (atoms.first(), atoms.get(1)) else {
                        tracing::warn!("skipping malformed definition header: {}", block.header.details);
                        continue;
                    };
                    let database = inner.resolve(db_name);
                    definitions.push(Definition::new(headword.clone(), database, block.body));
                }
                Ok(definitions)
            }
            _ => Err(unexpected_status(&status)),
        }
    }

    /// Retrieve headwords matching `word` under `strategy` in `database`.
    ///
    /// Returns an order-preserving, de-duplicated list (server order,
    /// duplicates collapsed). Status 552 yields an empty list.
    pub fn match_words(
        &self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<Vec<String>> {
        let mut inner = self.inner.lock();

        let command = format!(
            "MATCH {} {} {}",
            database.name,
            strategy.name,
            quote_phrase(word)
        );
        let status = inner.exchange(&command)?;

        match status.code {
            CODE_NO_MATCH => Ok(Vec::new()),
            CODE_MATCHES_FOLLOW => {
                let count = status.leading_count()?;
                let recovered = read_entry_lines(inner.transport.as_mut(), count);
                if !recovered.complete {
                    tracing::warn!(
                        "stream ended early: recovered {} of {} matches",
                        recovered.entries.len(),
                        count
                    );
                }

                let mut matches: Vec<String> = Vec::with_capacity(recovered.entries.len());
                for atoms in recovered.entries {
                    let Some(headword) = atoms.get(1) else {
                        tracing::warn!("skipping malformed match line: {:?}", atoms);
                        continue;
                    };
                    if !matches.iter().any(|m| m == headword) {
                        matches.push(headword.clone());
                    }
                }
                Ok(matches)
            }
            _ => Err(unexpected_status(&status)),
        }
    }

    /// List the databases offered by the server.
    ///
    /// Memoized: the first call issues `SHOW DB` and caches the catalog
    /// for the life of the connection; later calls answer from the cache
    /// without touching the wire. Status 554 yields an empty list.
    pub fn databases(&self) -> Result<Vec<Database>> {
        let mut inner = self.inner.lock();
        inner.fetch_catalog()?;
        Ok(inner.catalog.clone())
    }

    /// List the matching strategies offered by the server.
    ///
    /// Not cached; each call issues `SHOW STRAT`. Status 555 yields an
    /// empty list.
    pub fn strategies(&self) -> Result<Vec<MatchingStrategy>> {
        let mut inner = self.inner.lock();

        let status = inner.exchange("SHOW STRAT")?;
        match status.code {
            CODE_NO_STRATEGIES => Ok(Vec::new()),
            CODE_STRATEGIES_FOLLOW => {
                let count = status.leading_count()?;
                let recovered = read_entry_lines(inner.transport.as_mut(), count);
                if !recovered.complete {
                    tracing::warn!(
                        "stream ended early: recovered {} of {} strategies",
                        recovered.entries.len(),
                        count
                    );
                }

                let mut strategies: Vec<MatchingStrategy> = Vec::new();
                for atoms in recovered.entries {
                    let (Some(name), Some(description)) = (atoms.first(), atoms.get(1)) else {
                        tracing::warn!("skipping malformed strategy line: {:?}", atoms);
                        continue;
                    };
                    if !strategies.iter().any(|s| &s.name == name) {
                        strategies.push(MatchingStrategy::new(name.clone(), description.clone()));
                    }
                }
                Ok(strategies)
            }
            _ => Err(unexpected_status(&status)),
        }
    }
}

// The transport is a trait object, so Debug cannot be derived.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // QUIT on the way out; close is idempotent and never fails.
        self.close();
    }
}

impl Inner {
    /// Fail if the transport no longer considers itself connected
    fn require_connected(&self) -> Result<()> {
        if self.transport.is_connected() {
            Ok(())
        } else {
            Err(DictError::Connection("disconnected".to_string()))
        }
    }

    /// Send one command line and read the reply's status line
    fn exchange(&mut self, command: &str) -> Result<StatusLine> {
        self.require_connected()?;
        self.transport
            .write_line(command)
            .map_err(|e| DictError::connection("failed to send command", e))?;
        StatusLine::read_from(self.transport.as_mut())
    }

    /// Populate the catalog via `SHOW DB` if it is empty.
    ///
    /// A 554 (no databases) reply leaves the catalog empty and is not an
    /// error; the next call will ask the server again.
    fn fetch_catalog(&mut self) -> Result<()> {
        if !self.catalog.is_empty() {
            return Ok(());
        }

        let status = self.exchange("SHOW DB")?;
        match status.code {
            CODE_NO_DATABASES => Ok(()),
            CODE_DATABASES_FOLLOW => {
                let count = status.leading_count()?;
                let recovered = read_entry_lines(self.transport.as_mut(), count);
                if !recovered.complete {
                    tracing::warn!(
                        "stream ended early: recovered {} of {} databases",
                        recovered.entries.len(),
                        count
                    );
                }

                for atoms in recovered.entries {
                    let (Some(name), Some(description)) = (atoms.first(), atoms.get(1)) else {
                        tracing::warn!("skipping malformed database line: {:?}", atoms);
                        continue;
                    };
                    self.upsert(Database::new(name.clone(), description.clone()));
                }
                tracing::debug!("catalog populated with {} databases", self.catalog.len());
                Ok(())
            }
            _ => Err(unexpected_status(&status)),
        }
    }

    /// Insert a database, overwriting a same-named entry in place so
    /// server order is kept
    fn upsert(&mut self, database: Database) {
        if let Some(existing) = self.catalog.iter_mut().find(|d| d.name == database.name) {
            *existing = database;
        } else {
            self.catalog.push(database);
        }
    }

    /// Resolve a short-name through the catalog, falling back to a
    /// placeholder descriptor so definitions stay well-formed
    fn resolve(&self, name: &str) -> Database {
        self.catalog
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .unwrap_or_else(|| Database::placeholder(name))
    }
}

/// Quote a word for the wire: double quotes only when it contains an
/// embedded space
fn quote_phrase(word: &str) -> String {
    if word.contains(' ') {
        format!("\"{}\"", word)
    } else {
        word.to_string()
    }
}
