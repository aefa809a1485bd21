use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::domain::Notification;

/// Current notifications, newest first. At most five; each disappears five
/// seconds after it was emitted.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifier.snapshot())
}
