/// aura library
///
/// Bookmarks with fuzzy resolution, context-aware action suggestions, a
/// small chat client and AI-assisted git commits. The `aura` binary is a
/// thin layer over this.

pub mod ai;
pub mod config;
pub mod context;
pub mod core;
pub mod db;
pub mod error;
pub mod git;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{AuraError, Result};
