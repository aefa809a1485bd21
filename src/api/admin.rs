use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::auctions::AuctionDto;
use super::AppState;
use crate::domain::{
    final_settlement, AuctionId, Decimal, PaymentProcessStatus, User, UserRole,
};
use crate::eligibility;
use crate::error::AppError;
use crate::importer::{self, ImportRowError};
use crate::textgen::{findings_or_empty, ValidationFinding};

fn require_admin(state: &AppState) -> Result<User, AppError> {
    let user = state
        .store
        .current_user()
        .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))?;
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }
    Ok(user)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBidDto {
    #[serde(flatten)]
    pub auction: AuctionDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidder_turnover: Option<Decimal>,
    /// Flags the submission for admin attention; same predicate as the elite
    /// badge.
    pub is_high_volume: bool,
}

/// Lots with a submission awaiting board review.
pub async fn pending_bids(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingBidDto>>, AppError> {
    require_admin(&state)?;

    let pending = state
        .store
        .auctions()
        .into_iter()
        .filter(|a| a.is_approval_pending())
        .map(|a| {
            let bidder = a
                .bid_submission()
                .and_then(|s| state.store.user(&s.user_id));
            PendingBidDto {
                bidder_turnover: bidder.as_ref().and_then(|b| b.monthly_turnover),
                is_high_volume: bidder
                    .as_ref()
                    .map(eligibility::is_high_volume)
                    .unwrap_or(false),
                auction: a.into(),
            }
        })
        .collect();

    Ok(Json(pending))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuditDto {
    #[serde(flatten)]
    pub auction: AuctionDto,
    /// Winning bid plus the fixed settlement surcharge.
    pub settlement_due: Decimal,
}

/// Lots whose submitted bank reference is awaiting verification.
pub async fn payment_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentAuditDto>>, AppError> {
    require_admin(&state)?;

    let queue = state
        .store
        .auctions()
        .into_iter()
        .filter(|a| a.payment_status() == Some(PaymentProcessStatus::VerifyingPayment))
        .map(|a| PaymentAuditDto {
            settlement_due: final_settlement(a.current_bid),
            auction: a.into(),
        })
        .collect();

    Ok(Json(queue))
}

/// Approve the pending submission. A lot without one returns unchanged.
pub async fn approve_bid(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AuctionDto>, AppError> {
    require_admin(&state)?;
    let id = AuctionId::new(id);

    if let Some(updated) = state.engine.approve_bid(&id).await {
        return Ok(Json(updated.into()));
    }
    unchanged(&state, &id)
}

/// Reject the pending submission. A lot without one returns unchanged.
pub async fn reject_bid(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AuctionDto>, AppError> {
    require_admin(&state)?;
    let id = AuctionId::new(id);

    if let Some(updated) = state.engine.reject_bid(&id).await {
        return Ok(Json(updated.into()));
    }
    unchanged(&state, &id)
}

/// Confirm a verified settlement. A lot not under verification returns
/// unchanged.
pub async fn confirm_payment(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AuctionDto>, AppError> {
    require_admin(&state)?;
    let id = AuctionId::new(id);

    if let Some(updated) = state.engine.confirm_payment(&id).await {
        return Ok(Json(updated.into()));
    }
    unchanged(&state, &id)
}

fn unchanged(state: &AppState, id: &AuctionId) -> Result<Json<AuctionDto>, AppError> {
    state
        .store
        .auction(id)
        .map(|a| Json(a.into()))
        .ok_or_else(|| AppError::NotFound(format!("Auction {} not found", id)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub imported: usize,
    pub errors: Vec<ImportRowError>,
}

/// Bulk-import lots from the CSV template. Valid rows land in STAGING.
pub async fn import_lots(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    require_admin(&state)?;

    let report = importer::parse_lots(&body);
    let imported = report.lots.len();
    state.store.insert_auctions(report.lots);

    Ok(Json(ImportResponse {
        imported,
        errors: report.errors,
    }))
}

/// Run the external validator over raw lot records. Collaborator failure
/// degrades to an empty finding list.
pub async fn validate_lots(
    State(state): State<AppState>,
    Json(rows): Json<Vec<serde_json::Value>>,
) -> Result<Json<Vec<ValidationFinding>>, AppError> {
    require_admin(&state)?;
    let findings = findings_or_empty(state.textgen.as_ref(), &rows).await;
    Ok(Json(findings))
}
