//! Local persistent session storage.
//!
//! A small SQLite key-value table standing in for the browser's local
//! storage: the current user snapshot and the watchlist id set, keyed by
//! fixed names. Loss or corruption of this store degrades to a logged-out
//! state, never a startup failure.

pub mod session;

pub use session::SessionStore;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Initialize the session database with schema and pragmas.
pub async fn init_session_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

    let schema_sql = include_str!("schema.sql");
    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(&pool).await?;
        }
    }

    info!("Session store initialized at {}", db_path);
    Ok(pool)
}
