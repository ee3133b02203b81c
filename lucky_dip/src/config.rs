// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

/// The names eligible for a lucky dip, in the order they were configured.
///
/// Invariant: every name is non-empty and already trimmed. Repeated names are
/// kept: a name listed twice is twice as likely to be drawn.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    /// Builds a pool from individual names, trimming them and dropping the
    /// empty ones.
    pub fn from_names<I, S>(names: I) -> NamePool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        NamePool {
            names: names
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }
}

/// The names that already appear in the persisted log.
pub type LoggedNames = HashSet<String>;

/// A single record of the log: who led the convoy on a given date.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LogEntry {
    pub id: String,
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub person1: String,
    pub person2: String,
    pub person3: String,
    /// Seconds since the epoch of the last write, when known.
    pub timestamp: Option<u64>,
}

/// The content of a log entry as typed in by an admin, before it is stored.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct EntryDraft {
    pub date: String,
    pub person1: String,
    pub person2: String,
    pub person3: String,
}

impl From<&LogEntry> for EntryDraft {
    fn from(e: &LogEntry) -> EntryDraft {
        EntryDraft {
            date: e.date.clone(),
            person1: e.person1.clone(),
            person2: e.person2.clone(),
            person3: e.person3.clone(),
        }
    }
}

/// The stored name pool document. Only `names` matters to the picker.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NamePoolRecord {
    pub names: Vec<String>,
    pub owner_id: Option<String>,
    pub last_updated: Option<u64>,
}

impl NamePoolRecord {
    pub fn pool(&self) -> NamePool {
        NamePool::from_names(&self.names)
    }
}

// ******** Output data structures *********

/// Why the picker had to start over before drawing.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ResetReason {
    /// Every name of the pool is already in the log. The whole pool is
    /// eligible again and the caller should tell the user.
    AllLogged,
}

/// The outcome of a successful lucky dip.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Pick {
    pub name: String,
    /// Set when this pick started a new round. The silent recovery after
    /// every available name was used in the session does not set it.
    pub reset: Option<ResetReason>,
}

/// Errors that prevent a pick from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PickError {
    EmptyPool,
}

impl Error for PickError {}

impl Display for PickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickError::EmptyPool => write!(f, "the name pool is empty: add names first"),
        }
    }
}

/// Errors raised at the log store boundary and by the session.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StoreError {
    NotFound(String),
    NotSignedIn,
    InvalidEntry(String),
}

impl Error for StoreError {}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "no log entry with id {}", id),
            StoreError::NotSignedIn => write!(f, "Please log in to make changes"),
            StoreError::InvalidEntry(msg) => write!(f, "invalid log entry: {}", msg),
        }
    }
}
