// Test store that fails selected operations
//
// Wraps a MemoryStore; each flag turns one operation into a storage error.

use crate::db::Bookmark;
use crate::error::{AuraError, Result};
use crate::store::{BookmarkStore, MemoryStore};
use async_trait::async_trait;

#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_search: bool,
    pub fail_list: bool,
    pub fail_history: bool,
    /// Inserts pointing at this path fail
    pub fail_insert_path: Option<String>,
}

fn closed() -> AuraError {
    AuraError::Storage(sqlx::Error::PoolClosed)
}

#[async_trait]
impl BookmarkStore for FaultyStore {
    async fn insert_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark> {
        if self.fail_insert_path.as_deref() == Some(path) {
            return Err(closed());
        }
        self.inner.insert_bookmark(alias, path).await
    }
    async fn get_bookmark(&self, alias: &str) -> Result<Option<Bookmark>> {
        self.inner.get_bookmark(alias).await
    }
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        if self.fail_list {
            return Err(closed());
        }
        self.inner.list_bookmarks().await
    }
    async fn delete_bookmark(&self, alias: &str) -> Result<()> {
        self.inner.delete_bookmark(alias).await
    }
    async fn search_bookmarks(&self, needle: &str) -> Result<Vec<Bookmark>> {
        if self.fail_search {
            return Err(closed());
        }
        self.inner.search_bookmarks(needle).await
    }
    async fn append_history(&self, path: &str) -> Result<()> {
        if self.fail_history {
            return Err(closed());
        }
        self.inner.append_history(path).await
    }
    async fn search_history(&self, needle: &str, limit: usize) -> Result<Vec<String>> {
        self.inner.search_history(needle, limit).await
    }
    async fn prune_history(&self, keep: usize) -> Result<u64> {
        self.inner.prune_history(keep).await
    }
    async fn close(&self) {}
}
