//! Strongly-typed identifiers
//!
//! Expense ids are opaque strings: new expenses get a random UUID, while ids
//! read back from older stores are kept verbatim whatever their format.
//! Participants are identified by an opaque string (usually an e-mail
//! address) whose ordering is the engine's stable tie-break order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix of the short display form of an expense id
const EXPENSE_DISPLAY_PREFIX: &str = "exp-";

/// Number of id characters shown after the display prefix
const EXPENSE_DISPLAY_LEN: usize = 8;

/// Identifier of a stored expense
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an id exactly as it was stored
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full stored id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a UUID, if it is one
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }

    /// Check whether this id's display form or full id starts with `prefix`
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.strip_prefix(EXPENSE_DISPLAY_PREFIX).unwrap_or(prefix);
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.0.chars().take(EXPENSE_DISPLAY_LEN).collect();
        write!(f, "{}{}", EXPENSE_DISPLAY_PREFIX, short)
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl FromStr for ExpenseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(EXPENSE_DISPLAY_PREFIX).unwrap_or(s);
        if s.is_empty() {
            Err("expense id cannot be empty".to_string())
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

/// Identifier of someone who can owe or be owed money
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a participant id, trimming surrounding whitespace
    ///
    /// Returns `None` for blank input.
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short name for display: the local part of an e-mail address, or the
    /// whole id otherwise
    pub fn display_name(&self) -> &str {
        match self.0.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => &self.0,
        }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| "participant id cannot be empty".to_string())
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}
