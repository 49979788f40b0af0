// Navigation on top of the resolver
//
// Exact alias first, fuzzy search second. Exactly one candidate is a hit;
// anything else is reported back, never guessed.

use crate::core::Resolver;
use crate::db::Candidate;
use crate::error::{AuraError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl Resolver {
    /// Resolve `query` to a single existing directory
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The target; a history entry has been recorded
    /// * `Err(AuraError::NotFound)` - Nothing matched
    /// * `Err(AuraError::AmbiguousMatch)` - More than one candidate
    /// * `Err(AuraError::InvalidPath)` - The target no longer exists
    pub async fn navigate(&self, query: &str) -> Result<PathBuf> {
        let query = query.trim();

        if let Some(bookmark) = self.get_bookmark(query).await? {
            debug!(alias = %bookmark.alias, "exact bookmark hit");
            return self.arrive(&bookmark.path).await;
        }

        let mut candidates = self.fuzzy_search(query).await?;
        match candidates.len() {
            0 => Err(AuraError::NotFound(format!(
                "No bookmarks found matching '{}'",
                query
            ))),
            1 => {
                let Candidate { path, .. } = candidates.remove(0);
                self.arrive(&path).await
            }
            _ => Err(AuraError::AmbiguousMatch {
                query: query.to_string(),
                candidates,
            }),
        }
    }

    // History is best-effort; a stale path is reported but left in place.
    async fn arrive(&self, path: &str) -> Result<PathBuf> {
        if let Err(e) = self.add_navigation_history(path).await {
            warn!(error = %e, path, "failed to add to navigation history");
        }

        let target = Path::new(path);
        if !target.exists() {
            return Err(AuraError::InvalidPath(format!(
                "Path '{}' no longer exists",
                path
            )));
        }

        Ok(target.to_path_buf())
    }
}
