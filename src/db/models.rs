/// Data models for database entities
///
/// `Bookmark` and `HistoryEntry` map to database tables; `Candidate` is the
/// transient result of a single resolution call and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Label prefix reserved for history-origin candidates
pub const HISTORY_LABEL_PREFIX: &str = "history:";

/// Case folding used for every match comparison, in both backends
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Represents a saved directory bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub alias: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// One recorded visit to a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub path: String,
    pub accessed_at: DateTime<Utc>,
}

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Bookmark,
    History,
}

/// Ranking tiers for a bookmark match. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    /// Empty query, plain listing
    Unranked = 0,
    ExactAlias = 1,
    AliasPrefix = 2,
    PathPrefix = 3,
    Substring = 4,
    /// Fallback results from navigation history
    History = 5,
}

impl MatchRank {
    /// Classify a bookmark against an already-normalized query.
    ///
    /// Returns `None` when neither the alias nor the path contains the query.
    pub fn classify(bookmark: &Bookmark, query: &str) -> Option<Self> {
        let alias = fold_case(&bookmark.alias);
        let path = fold_case(&bookmark.path);

        if alias == query {
            Some(MatchRank::ExactAlias)
        } else if alias.starts_with(query) {
            Some(MatchRank::AliasPrefix)
        } else if path.starts_with(query) {
            Some(MatchRank::PathPrefix)
        } else if alias.contains(query) || path.contains(query) {
            Some(MatchRank::Substring)
        } else {
            None
        }
    }
}

/// A ranked resolution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The alias, or `history:<path>` for history results
    pub label: String,
    pub path: String,
    pub origin: Origin,
    pub rank: u8,
}

impl Candidate {
    pub fn from_bookmark(bookmark: Bookmark, rank: MatchRank) -> Self {
        Self {
            label: bookmark.alias,
            path: bookmark.path,
            origin: Origin::Bookmark,
            rank: rank as u8,
        }
    }

    pub fn history(path: String) -> Self {
        Self {
            label: format!("{}{}", HISTORY_LABEL_PREFIX, path),
            path,
            origin: Origin::History,
            rank: MatchRank::History as u8,
        }
    }

    /// The alias to remove this candidate by, if it is a real bookmark
    pub fn alias(&self) -> Option<&str> {
        match self.origin {
            Origin::Bookmark => Some(&self.label),
            Origin::History => None,
        }
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.origin {
            Origin::Bookmark => write!(f, "{} -> {}", self.label, self.path),
            Origin::History => write!(f, "{}", self.path),
        }
    }
}
