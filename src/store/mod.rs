/// Storage abstraction for bookmarks and navigation history
///
/// The resolver only ever talks to a `BookmarkStore`. Which backend sits
/// behind it is decided once, when the configuration opens the store.

#[cfg(test)]
pub mod faulty;
pub mod memory;

pub use memory::MemoryStore;

use crate::db::Bookmark;
use crate::error::Result;
use async_trait::async_trait;

/// Maximum number of distinct paths returned by a history search
pub const HISTORY_SEARCH_LIMIT: usize = 10;

/// Operations the resolver needs from a persistence backend.
///
/// `needle` arguments are already trimmed and passed through `fold_case`;
/// backends match them as plain substrings against `fold_case`d values.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Insert a bookmark. Fails with `DuplicateAlias` if the alias is taken.
    async fn insert_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark>;

    /// Point lookup by alias. `Ok(None)` when absent.
    async fn get_bookmark(&self, alias: &str) -> Result<Option<Bookmark>>;

    /// Every bookmark ordered by alias (byte order).
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>>;

    /// Delete by alias. Fails with `NotFound` if the alias is absent.
    async fn delete_bookmark(&self, alias: &str) -> Result<()>;

    /// Bookmarks whose alias or path contains `needle`, ordered by alias.
    async fn search_bookmarks(&self, needle: &str) -> Result<Vec<Bookmark>>;

    /// Append one visit. No deduplication.
    async fn append_history(&self, path: &str) -> Result<()>;

    /// Distinct visited paths containing `needle`, most recent visit first.
    async fn search_history(&self, needle: &str, limit: usize) -> Result<Vec<String>>;

    /// Keep only the newest `keep` history rows. Returns rows deleted.
    async fn prune_history(&self, keep: usize) -> Result<u64>;

    /// Release backend resources. Called once before exit.
    async fn close(&self);
}
