//! Append-only per-user activity log.
//!
//! Every lifecycle transition lands here. The history is ordered newest
//! first, never evicted, and is the single source of truth for the
//! duplicate-bid check, so completeness is load-bearing.

use crate::db::SessionStore;
use crate::domain::{ActivityDraft, UserActivity, UserId};
use crate::store::AppStore;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<AppStore>,
    sessions: SessionStore,
}

impl ActivityLog {
    pub fn new(store: Arc<AppStore>, sessions: SessionStore) -> Self {
        Self { store, sessions }
    }

    /// Assign identity and timestamp to the draft and prepend it to the
    /// user's history. When the user is the active session, the updated user
    /// snapshot is mirrored into the persisted session store; a mirror
    /// failure is logged and swallowed, it never rolls back the append.
    ///
    /// Returns None when no such user exists.
    pub async fn record(&self, user_id: &UserId, draft: ActivityDraft) -> Option<UserActivity> {
        let activity = draft.seal();
        let updated = self.store.push_activity(user_id, activity.clone())?;

        if self.store.current_user_id().as_ref() == Some(user_id) {
            if let Err(e) = self.sessions.save_user(&updated).await {
                warn!("Failed to mirror session snapshot for {}: {}", user_id, e);
            }
        }

        Some(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_session_db;
    use crate::domain::ActivityType;
    use crate::seed;
    use tempfile::TempDir;

    async fn log() -> (ActivityLog, Arc<AppStore>, TempDir) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.db").to_string_lossy().to_string();
        let pool = init_session_db(&path).await.unwrap();
        let sessions = SessionStore::new(pool);
        let store = Arc::new(AppStore::new(seed::seed_users(), seed::seed_auctions()));
        (ActivityLog::new(store.clone(), sessions.clone()), store, temp)
    }

    #[tokio::test]
    async fn test_record_prepends_newest_first() {
        let (log, store, _temp) = log().await;
        let id = UserId::new("bidder02");

        log.record(&id, ActivityDraft::new(ActivityType::Login, "first"))
            .await
            .unwrap();
        log.record(&id, ActivityDraft::new(ActivityType::Login, "second"))
            .await
            .unwrap();

        let history = store.user(&id).unwrap().activity_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].description, "second");
        assert_eq!(history[1].description, "first");
    }

    #[tokio::test]
    async fn test_record_unknown_user_is_none() {
        let (log, _store, _temp) = log().await;
        let out = log
            .record(
                &UserId::new("ghost"),
                ActivityDraft::new(ActivityType::Login, "x"),
            )
            .await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn test_active_session_is_mirrored() {
        let (log, store, _temp) = log().await;
        let id = UserId::new("bidder03");
        store.set_current_user(Some(id.clone()));

        log.record(&id, ActivityDraft::new(ActivityType::KycSubmit, "verified"))
            .await
            .unwrap();

        let saved = log.sessions.load_user().await.unwrap().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.activity_history.len(), 1);
    }
}
