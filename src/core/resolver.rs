/// Bookmark resolver
///
/// Owns bookmark CRUD on top of a `BookmarkStore` and turns free-text queries
/// into ranked candidates: bookmarks first, navigation history only when no
/// bookmark matches.

use crate::core::paths;
use crate::db::{fold_case, Bookmark, Candidate, MatchRank};
use crate::error::{AuraError, Result};
use crate::store::{BookmarkStore, HISTORY_SEARCH_LIMIT};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Resolver {
    store: Arc<dyn BookmarkStore>,
    history_limit: Option<usize>,
}

impl Resolver {
    /// Create a resolver over an opened store
    ///
    /// # Arguments
    /// * `store` - The storage backend
    /// * `history_limit` - Optional cap on retained history rows
    pub fn new(store: Arc<dyn BookmarkStore>, history_limit: Option<usize>) -> Self {
        Self {
            store,
            history_limit,
        }
    }

    /// Add a bookmark. The caller has already validated and normalized `path`.
    ///
    /// # Returns
    /// * `Ok(Bookmark)` - The stored bookmark
    /// * `Err(AuraError::InvalidPath)` - Empty or unsafe alias, or empty path
    /// * `Err(AuraError::DuplicateAlias)` - Alias already exists
    pub async fn add_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark> {
        check_input(alias, path)?;

        let bookmark = self.store.insert_bookmark(alias, path).await?;
        info!(alias, path, "bookmark added");
        Ok(bookmark)
    }

    /// Point `alias` at `path`, replacing any existing bookmark
    ///
    /// If the new insert fails the previous bookmark is put back before the
    /// error is returned.
    pub async fn replace_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark> {
        check_input(alias, path)?;

        let Some(previous) = self.store.get_bookmark(alias).await? else {
            return self.add_bookmark(alias, path).await;
        };

        self.store.delete_bookmark(alias).await?;
        match self.store.insert_bookmark(alias, path).await {
            Ok(bookmark) => {
                info!(alias, from = %previous.path, to = path, "bookmark replaced");
                Ok(bookmark)
            }
            Err(e) => {
                if let Err(restore) = self.store.insert_bookmark(alias, &previous.path).await {
                    warn!(alias, error = %restore, "failed to restore bookmark");
                }
                Err(e)
            }
        }
    }

    /// Exact, case-sensitive lookup. Absence is `Ok(None)`.
    pub async fn get_bookmark(&self, alias: &str) -> Result<Option<Bookmark>> {
        self.store.get_bookmark(alias).await
    }

    pub async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.store.list_bookmarks().await
    }

    pub async fn remove_bookmark(&self, alias: &str) -> Result<()> {
        self.store.delete_bookmark(alias).await?;
        info!(alias, "bookmark removed");
        Ok(())
    }

    /// Record a visit, then enforce the retention cap if one is configured
    pub async fn add_navigation_history(&self, path: &str) -> Result<()> {
        self.store.append_history(path).await?;

        if let Some(keep) = self.history_limit {
            let pruned = self.store.prune_history(keep).await?;
            if pruned > 0 {
                debug!(pruned, keep, "pruned navigation history");
            }
        }

        Ok(())
    }

    /// Resolve a query into ranked candidates
    ///
    /// An empty query lists every bookmark. Otherwise bookmarks are matched
    /// on alias or path and ordered exact alias, alias prefix, path prefix,
    /// then any substring, ties by alias. History is consulted only when no
    /// bookmark matches.
    pub async fn fuzzy_search(&self, query: &str) -> Result<Vec<Candidate>> {
        let needle = fold_case(query.trim());

        if needle.is_empty() {
            let all = self.store.list_bookmarks().await?;
            return Ok(all
                .into_iter()
                .map(|b| Candidate::from_bookmark(b, MatchRank::Unranked))
                .collect());
        }

        let mut ranked: Vec<(MatchRank, Bookmark)> = self
            .store
            .search_bookmarks(&needle)
            .await?
            .into_iter()
            .filter_map(|b| MatchRank::classify(&b, &needle).map(|rank| (rank, b)))
            .collect();

        if !ranked.is_empty() {
            ranked.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.alias.cmp(&b.alias)));
            debug!(query = %needle, matches = ranked.len(), "resolved from bookmarks");
            return Ok(ranked
                .into_iter()
                .map(|(rank, b)| Candidate::from_bookmark(b, rank))
                .collect());
        }

        let history = self
            .store
            .search_history(&needle, HISTORY_SEARCH_LIMIT)
            .await?;
        debug!(query = %needle, matches = history.len(), "resolved from history");

        Ok(history.into_iter().map(Candidate::history).collect())
    }
}

fn check_input(alias: &str, path: &str) -> Result<()> {
    paths::validate_alias(alias)?;
    if path.trim().is_empty() {
        return Err(AuraError::InvalidPath("path must not be empty".to_string()));
    }
    Ok(())
}
