/// SQLite persistence for bookmarks and navigation history
///
/// `Database` owns the sqlx pool; the `BookmarkStore` impl lives in queries.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
