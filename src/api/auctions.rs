use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{
    Auction, AuctionId, AuctionStatus, BidSubmission, Decimal, PaymentProcessStatus, User,
    UserId, Vehicle,
};
use crate::eligibility;
use crate::error::AppError;
use crate::textgen::summary_or_fallback;

/// Flat client view of a lot, derived from the sale phase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDto {
    pub id: AuctionId,
    pub vehicle: Vehicle,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub base_price: Decimal,
    pub current_bid: Decimal,
    pub bid_increment: Decimal,
    pub status: AuctionStatus,
    pub bids_count: u32,
    pub is_approval_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentProcessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_submission: Option<BidSubmission>,
}

impl From<Auction> for AuctionDto {
    fn from(a: Auction) -> Self {
        AuctionDto {
            is_approval_pending: a.is_approval_pending(),
            winner_id: a.winner_id().cloned(),
            payment_status: a.payment_status(),
            payment_reference: a.payment_reference().map(|s| s.to_string()),
            bid_submission: a.bid_submission().cloned(),
            id: a.id,
            vehicle: a.vehicle,
            start_time: a.start_time,
            end_time: a.end_time,
            base_price: a.base_price,
            current_bid: a.current_bid,
            bid_increment: a.bid_increment,
            status: a.status,
            bids_count: a.bids_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionsQuery {
    pub state: Option<String>,
    pub status: Option<AuctionStatus>,
}

fn current_user(state: &AppState) -> Result<User, AppError> {
    state
        .store
        .current_user()
        .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))
}

/// Lots visible to the current session, strictly filtered by viewing
/// territory (admins see everything).
pub async fn list_auctions(
    Query(params): Query<AuctionsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AuctionDto>>, AppError> {
    let user = current_user(&state)?;

    let lots = state
        .store
        .auctions()
        .into_iter()
        .filter(|a| eligibility::can_view_territory(&user, &a.vehicle.state))
        .filter(|a| {
            params
                .state
                .as_deref()
                .map(|s| a.vehicle.state.as_str() == s)
                .unwrap_or(true)
        })
        .filter(|a| params.status.map(|s| a.status == s).unwrap_or(true))
        .map(AuctionDto::from)
        .collect();

    Ok(Json(lots))
}

/// Lot detail. Viewing a live lot also starts its simulated competing-bid
/// feed, mirroring the detail view mounting.
pub async fn get_auction(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AuctionDto>, AppError> {
    let user = current_user(&state)?;
    let id = AuctionId::new(id);
    let auction = state
        .store
        .auction(&id)
        .ok_or_else(|| AppError::NotFound(format!("Auction {} not found", id)))?;

    if !eligibility::can_view_territory(&user, &auction.vehicle.state) {
        return Err(AppError::Forbidden(format!(
            "Territory {} is not in your viewing states",
            auction.vehicle.state
        )));
    }

    state.sim.watch(&id);
    Ok(Json(auction.into()))
}

/// Tear down the lot's simulated feed when the detail view unmounts.
pub async fn close_feed(Path(id): Path<String>, State(state): State<AppState>) -> Json<serde_json::Value> {
    state.sim.unwatch(&AuctionId::new(id));
    Json(serde_json::json!({ "ok": true }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub price: Decimal,
    pub time: DateTime<Utc>,
}

/// Competing floor activity: the simulated feed merged with the session
/// user's own registered bid, sorted by price descending.
pub async fn get_leaderboard(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let user = current_user(&state)?;
    let id = AuctionId::new(id);

    let mut entries: Vec<LeaderboardEntry> = state
        .sim
        .entries(&id)
        .into_iter()
        .map(|e| LeaderboardEntry {
            name: e.name,
            price: e.price,
            time: e.time,
        })
        .collect();

    if let Some(own) = user.activity_history.iter().find(|act| {
        act.activity_type == crate::domain::ActivityType::BidSubmitted
            && act.target_id.as_ref() == Some(&id)
    }) {
        entries.push(LeaderboardEntry {
            name: format!("{} (YOU)", user.name),
            price: own.amount.unwrap_or_default(),
            time: own.timestamp,
        });
    }

    entries.sort_by(|a, b| b.price.cmp(&a.price));
    Ok(Json(entries))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
}

/// AI-generated sales prose for the lot's vehicle; falls back to canned text
/// when the collaborator is unavailable.
pub async fn get_summary(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let id = AuctionId::new(id);
    let auction = state
        .store
        .auction(&id)
        .ok_or_else(|| AppError::NotFound(format!("Auction {} not found", id)))?;

    let summary = summary_or_fallback(state.textgen.as_ref(), &auction.vehicle).await;
    Ok(Json(SummaryResponse { summary }))
}
