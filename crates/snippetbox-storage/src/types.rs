//! Domain types for storage layer

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of snippets returned by `latest`
pub const LATEST_LIMIT: i64 = 10;

/// Strongly-typed snippet identifier
///
/// Assigned by the storage engine on insert and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(i64);

impl SnippetId {
    /// Create a new SnippetId from a raw database id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw database id
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SnippetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for SnippetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// A time-bounded text snippet
///
/// Write-once: there is no update path. A snippet stays in storage after it
/// expires but is never returned by a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Whether the snippet is visible at `now` (`expires` strictly after it)
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }

    /// Lifetime granted at insert time
    pub fn lifetime(&self) -> Duration {
        self.expires - self.created
    }
}
