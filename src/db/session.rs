//! Key-value session snapshot operations.

use crate::domain::{AuctionId, User};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashSet;
use tracing::warn;

/// Fixed key for the current-user snapshot.
const USER_KEY: &str = "ab_user";
/// Fixed key for the watchlist id set.
const WATCHLIST_KEY: &str = "ab_watchlist";

/// Persisted session state. Read once at startup, written on every
/// login/logout/watchlist toggle and on activity mirroring.
#[derive(Debug, Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        SessionStore { pool }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query("SELECT value FROM session_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>(0)))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO session_kv (key, value, updated_at) VALUES (?, ?, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM session_kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Load the saved user snapshot. A malformed value degrades to None.
    pub async fn load_user(&self) -> Result<Option<User>, sqlx::Error> {
        let Some(raw) = self.get(USER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding corrupt saved session: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn save_user(&self, user: &User) -> Result<(), sqlx::Error> {
        let json = serde_json::to_string(user)
            .map_err(|e| sqlx::Error::Protocol(format!("session encode: {}", e)))?;
        self.put(USER_KEY, &json).await
    }

    pub async fn clear_user(&self) -> Result<(), sqlx::Error> {
        self.delete(USER_KEY).await
    }

    /// Load the saved watchlist. A malformed value degrades to an empty set.
    pub async fn load_watchlist(&self) -> Result<HashSet<AuctionId>, sqlx::Error> {
        let Some(raw) = self.get(WATCHLIST_KEY).await? else {
            return Ok(HashSet::new());
        };
        match serde_json::from_str::<HashSet<AuctionId>>(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!("Discarding corrupt saved watchlist: {}", e);
                Ok(HashSet::new())
            }
        }
    }

    pub async fn save_watchlist(&self, ids: &HashSet<AuctionId>) -> Result<(), sqlx::Error> {
        let json = serde_json::to_string(ids)
            .map_err(|e| sqlx::Error::Protocol(format!("watchlist encode: {}", e)))?;
        self.put(WATCHLIST_KEY, &json).await
    }

    /// Raw write, used by tests to simulate on-disk corruption.
    #[cfg(test)]
    pub async fn put_raw(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        self.put(key, value).await
    }
}
