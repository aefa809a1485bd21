use super::AppState;
use crate::domain::User;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    state
        .engine
        .login(&req.user_id, &req.password)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))
}

pub async fn logout(State(state): State<AppState>) -> Json<Value> {
    state.engine.logout().await;
    Json(json!({ "ok": true }))
}
