use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::domain::AuctionId;
use crate::error::AppError;

pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<AuctionId>> {
    let mut ids: Vec<AuctionId> = state.store.watchlist().into_iter().collect();
    ids.sort();
    Json(ids)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub watched: bool,
}

pub async fn toggle(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ToggleResponse>, AppError> {
    let watched = state
        .engine
        .toggle_watchlist(&AuctionId::new(id))
        .await?;
    Ok(Json(ToggleResponse { watched }))
}
