use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::domain::{Decimal, Territory, User};
use crate::error::AppError;

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    state
        .store
        .current_user()
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRequest {
    pub bidding_states: Vec<String>,
    pub viewing_states: Vec<String>,
    pub monthly_turnover: Option<Decimal>,
    pub three_month_turnover: Option<Decimal>,
}

/// Update territory selections and declared turnovers. The tier cap on
/// bidding states is enforced against the newly declared turnover.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<DeclarationRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .engine
        .update_declaration(
            req.bidding_states.into_iter().map(Territory::new).collect(),
            req.viewing_states.into_iter().map(Territory::new).collect(),
            req.monthly_turnover,
            req.three_month_turnover,
        )
        .await?;
    Ok(Json(user))
}

pub async fn verify_kyc(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    let user = state.engine.verify_kyc().await?;
    Ok(Json(user))
}
