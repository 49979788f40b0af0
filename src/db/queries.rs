/// SQL query functions for database operations
///
/// Implements `BookmarkStore` on top of the SQLite pool. Every value goes
/// through a bound parameter.

use crate::db::models::*;
use crate::db::Database;
use crate::error::{AuraError, Result};
use crate::store::BookmarkStore;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

const BOOKMARK_COLUMNS: &str = "id, alias, path, created_at";

#[async_trait]
impl BookmarkStore for Database {
    /// Insert a new bookmark
    ///
    /// # Returns
    /// * `Ok(Bookmark)` - The stored row
    /// * `Err(AuraError::DuplicateAlias)` - If the alias already exists
    async fn insert_bookmark(&self, alias: &str, path: &str) -> Result<Bookmark> {
        let result = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (alias, path, created_at)
            VALUES (?, ?, ?)
            RETURNING id, alias, path, created_at
            "#,
        )
        .bind(alias)
        .bind(path)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await;

        match result {
            Ok(bookmark) => Ok(bookmark),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuraError::DuplicateAlias(alias.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_bookmark(&self, alias: &str) -> Result<Option<Bookmark>> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {} FROM bookmarks WHERE alias = ?",
            BOOKMARK_COLUMNS
        ))
        .bind(alias)
        .fetch_optional(self.pool())
        .await?;

        Ok(bookmark)
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {} FROM bookmarks ORDER BY alias",
            BOOKMARK_COLUMNS
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(bookmarks)
    }

    async fn delete_bookmark(&self, alias: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE alias = ?")
            .bind(alias)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuraError::NotFound(format!("Bookmark '{}'", alias)));
        }

        Ok(())
    }

    /// Substring scan over alias and path
    ///
    /// SQLite's `lower()` only folds ASCII, so the comparison runs
    /// in Rust with `fold_case` over the ordered listing.
    async fn search_bookmarks(&self, needle: &str) -> Result<Vec<Bookmark>> {
        let bookmarks: Vec<Bookmark> = self
            .list_bookmarks()
            .await?
            .into_iter()
            .filter(|b| fold_case(&b.alias).contains(needle) || fold_case(&b.path).contains(needle))
            .collect();

        debug!(needle, matches = bookmarks.len(), "bookmark scan");
        Ok(bookmarks)
    }

    async fn append_history(&self, path: &str) -> Result<()> {
        sqlx::query("INSERT INTO navigation_history (path, accessed_at) VALUES (?, ?)")
            .bind(path)
            .bind(Utc::now())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Distinct paths ordered by their latest visit
    ///
    /// Row ids grow with insertion, so `MAX(id)` is the most recent visit even
    /// when two visits share a timestamp. Matching happens after the query,
    /// for the same reason as `search_bookmarks`.
    async fn search_history(&self, needle: &str, limit: usize) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT path
            FROM navigation_history
            GROUP BY path
            ORDER BY MAX(id) DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(path,)| path)
            .filter(|path| fold_case(path).contains(needle))
            .take(limit)
            .collect())
    }

    async fn prune_history(&self, keep: usize) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM navigation_history
            WHERE id NOT IN (
                SELECT id FROM navigation_history ORDER BY id DESC LIMIT ?
            )
            "#,
        )
        .bind(keep as i64)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        Database::close(self).await;
    }
}
