/// Error types for aura
///
/// Every failure the library can report lives here. Uses thiserror for
/// ergonomic error handling; "nothing matched" is never an error at this
/// level, only at the navigation boundary.

use crate::db::Candidate;
use thiserror::Error;

/// Main error type for aura operations
#[derive(Error, Debug)]
pub enum AuraError {
    /// Lookup or removal target does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Insertion conflict on a unique alias
    #[error("Bookmark '{0}' already exists")]
    DuplicateAlias(String),

    /// More than one candidate for a navigation query
    #[error("Multiple matches found for '{query}'")]
    AmbiguousMatch {
        query: String,
        candidates: Vec<Candidate>,
    },

    /// Storage backend failure, distinct from an empty result
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Target path or alias failed validation
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// I/O errors (file operations, child processes, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat API answered with something other than a completion
    #[error("AI error: {0}")]
    Ai(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Selected action had no command to run
    #[error("Refusing to execute an empty command")]
    EmptyCommand,
}

/// Result type alias for aura operations
pub type Result<T> = std::result::Result<T, AuraError>;

impl AuraError {
    /// Convert AuraError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AuraError::NotFound(what) => format!("{} not found", what),
            AuraError::DuplicateAlias(alias) => {
                format!("Bookmark '{}' already exists. Remove it first or pick another alias.", alias)
            }
            AuraError::AmbiguousMatch { query, candidates } => format!(
                "'{}' matches {} locations. Please be more specific.",
                query,
                candidates.len()
            ),
            AuraError::Storage(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            AuraError::InvalidPath(reason) => format!("Invalid path: {}", reason),
            AuraError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            AuraError::Config(msg) => format!("Configuration issue: {}", msg),
            AuraError::Ai(msg) => format!("AI request failed: {}", msg),
            AuraError::Http(e) => format!("Could not reach the AI service. Details: {}", e),
            AuraError::Serialization(e) => format!("Data format error: {}", e),
            AuraError::EmptyCommand => "The selected action has no command to run".to_string(),
        }
    }

    /// Process exit status for this error. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuraError::NotFound(_) | AuraError::AmbiguousMatch { .. } => 1,
            AuraError::InvalidPath(_) | AuraError::DuplicateAlias(_) => 2,
            AuraError::Config(_) | AuraError::EmptyCommand => 3,
            AuraError::Storage(_) | AuraError::Serialization(_) => 4,
            AuraError::Io(_) | AuraError::Ai(_) | AuraError::Http(_) => 5,
        }
    }
}
