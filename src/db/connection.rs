/// SQLite connection pool for the bookmark store
///
/// Opening a database also applies the schema, so a fresh file is usable
/// straight away.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

// Every statement is idempotent; applied on each open
const SCHEMA: &str = include_str!("../../database/schema.sql");

#[derive(Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database file at `db_path`
    ///
    /// Missing parent directories are created.
    ///
    /// # Examples
    /// ```no_run
    /// use aura_lib::db::Database;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::new("/tmp/aura/aura.db").await?;
    /// db.close().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .disable_statement_logging();
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self::with_schema(pool, db_path).await?;
        debug!(path = %db.db_path.display(), "opened bookmark database");
        Ok(db)
    }

    /// In-memory database for tests
    ///
    /// Pinned to one connection that never expires; a second connection
    /// would see a different, empty database.
    #[cfg(test)]
    pub async fn new_test() -> Result<Self> {
        use std::str::FromStr;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;

        Self::with_schema(pool, PathBuf::from(":memory:")).await
    }

    async fn with_schema(pool: SqlitePool, db_path: PathBuf) -> Result<Self> {
        let db = Self {
            pool: Arc::new(pool),
            db_path,
        };

        // sqlx runs one statement per execute
        for statement in SCHEMA.split(';').map(str::trim) {
            let only_comments = statement
                .lines()
                .all(|line| line.trim().is_empty() || line.trim().starts_with("--"));
            if !only_comments {
                sqlx::query(statement).execute(db.pool()).await?;
            }
        }

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Drain and close the pool. Call once before the process exits.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
