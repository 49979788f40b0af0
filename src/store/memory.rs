// In-memory bookmark store
//
// Same contract as the SQLite backend, held in a BTreeMap keyed by alias so
// listing comes out ordered for free. Nothing survives the process.

use crate::db::{fold_case, Bookmark, HistoryEntry};
use crate::error::{AuraError, Result};
use crate::store::BookmarkStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    bookmarks: BTreeMap<String, Bookmark>,
    history: Vec<HistoryEntry>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another thread panicked mid-write; the maps
    // themselves are still structurally valid.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn insert_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark> {
        let mut inner = self.lock();
        if inner.bookmarks.contains_key(alias) {
            return Err(AuraError::DuplicateAlias(alias.to_string()));
        }

        let bookmark = Bookmark {
            id: inner.next_id(),
            alias: alias.to_string(),
            path: path.to_string(),
            created_at: Utc::now(),
        };
        inner.bookmarks.insert(alias.to_string(), bookmark.clone());

        Ok(bookmark)
    }

    async fn get_bookmark(&self, alias: &str) -> Result<Option<Bookmark>> {
        Ok(self.lock().bookmarks.get(alias).cloned())
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        Ok(self.lock().bookmarks.values().cloned().collect())
    }

    async fn delete_bookmark(&self, alias: &str) -> Result<()> {
        match self.lock().bookmarks.remove(alias) {
            Some(_) => Ok(()),
            None => Err(AuraError::NotFound(format!("Bookmark '{}'", alias))),
        }
    }

    async fn search_bookmarks(&self, needle: &str) -> Result<Vec<Bookmark>> {
        Ok(self
            .lock()
            .bookmarks
            .values()
            .filter(|b| {
                fold_case(&b.alias).contains(needle) || fold_case(&b.path).contains(needle)
            })
            .cloned()
            .collect())
    }

    async fn append_history(&self, path: &str) -> Result<()> {
        let mut inner = self.lock();
        let entry = HistoryEntry {
            id: inner.next_id(),
            path: path.to_string(),
            accessed_at: Utc::now(),
        };
        inner.history.push(entry);
        Ok(())
    }

    async fn search_history(&self, needle: &str, limit: usize) -> Result<Vec<String>> {
        let inner = self.lock();
        let mut seen = HashSet::new();

        // Newest rows sit at the end of the vector
        Ok(inner
            .history
            .iter()
            .rev()
            .filter(|entry| fold_case(&entry.path).contains(needle))
            .filter(|entry| seen.insert(entry.path.clone()))
            .take(limit)
            .map(|entry| entry.path.clone())
            .collect())
    }

    async fn prune_history(&self, keep: usize) -> Result<u64> {
        let mut inner = self.lock();
        let excess = inner.history.len().saturating_sub(keep);
        inner.history.drain(..excess);
        Ok(excess as u64)
    }

    async fn close(&self) {}
}
