use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::auctions::AuctionDto;
use super::AppState;
use crate::domain::{AuctionId, Decimal};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    pub bid_amount: Decimal,
    pub settlement_amount: Decimal,
}

/// Submit a manual bid for admin review.
pub async fn submit_bid(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<BidRequest>,
) -> Result<Json<AuctionDto>, AppError> {
    let auction = state
        .engine
        .submit_bid(&AuctionId::new(id), req.bid_amount, req.settlement_amount)
        .await?;
    Ok(Json(auction.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub reference: String,
}

/// Submit the bank transaction reference for a won lot.
pub async fn initiate_payment(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<AuctionDto>, AppError> {
    let auction = state
        .engine
        .initiate_payment(&AuctionId::new(id), &req.reference)
        .await?;
    Ok(Json(auction.into()))
}
