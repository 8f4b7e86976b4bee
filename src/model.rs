//! Value types returned by a session
//!
//! Plain data holders for databases, matching strategies, and
//! definitions. All of them are constructed by the parsing layer and
//! immutable afterwards.

use std::fmt;

/// A dictionary database offered by the server.
///
/// The name is the stable short-name used on the wire (e.g. `wn` for
/// WordNet). The special names `*` (all databases) and `!` (first
/// database with a result) are ordinary names as far as this type is
/// concerned; they pass through to the server unaltered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    /// Machine-readable short-name (unique key within a server)
    pub name: String,

    /// Human-readable description
    pub description: String,
}

impl Database {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Placeholder for a short-name the catalog does not know.
    ///
    /// Keeps a `Definition` well-formed when a server announces an entry
    /// from a database it never listed in `SHOW DB`.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

/// A word-matching strategy offered by the server (e.g. `exact`, `prefix`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingStrategy {
    /// Machine-readable short-name (unique key within a server)
    pub name: String,

    /// Human-readable description
    pub description: String,
}

impl MatchingStrategy {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

/// One definition of a headword, as returned by `DEFINE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The defined headword, as echoed by the server
    pub headword: String,

    /// The database the definition came from, resolved through the
    /// session catalog by short-name
    pub database: Database,

    /// Definition body: original lines in original order, each line
    /// followed by a newline, terminator line excluded
    pub body: String,
}

impl Definition {
    pub fn new(headword: impl Into<String>, database: Database, body: impl Into<String>) -> Self {
        Self {
            headword: headword.into(),
            database,
            body: body.into(),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.headword, self.database.name)?;
        write!(f, "{}", self.body)
    }
}
