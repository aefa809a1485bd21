//! Auction aggregate: the lot under the hammer, its sale phase, and the
//! settlement arithmetic shared by the display and payment paths.

use crate::domain::{AuctionId, UserId, Vehicle};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Listing status of a lot. `Staging` is the landing status for bulk-imported
/// lots awaiting publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Upcoming,
    Live,
    Closed,
    Staging,
}

/// Flat payment-progress view exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentProcessStatus {
    AwaitingApproval,
    OpenForPayment,
    VerifyingPayment,
    PaymentDone,
}

/// A bidder's manual offer, held for admin review. At most one may be
/// outstanding per auction at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidSubmission {
    pub user_id: UserId,
    pub user_name: String,
    pub bid_amount: Decimal,
    pub settlement_amount: Decimal,
}

/// Settlement progress after a winner has been assigned. A payment status
/// cannot exist without a winner because it only lives inside
/// [`SalePhase::Awarded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTrack {
    /// Historic closed lots carried over without settlement tracking.
    Untracked,
    OpenForPayment,
    Verifying { reference: String },
    Done { reference: Option<String> },
}

/// Sale lifecycle of a lot, as a sum type so illegal field combinations
/// (approval pending together with a winner, a payment reference without a
/// verification stage) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalePhase {
    /// Open for a new manual bid.
    Open,
    /// One submission locked for admin review.
    UnderReview { submission: BidSubmission },
    /// Winner assigned; settlement tracked by `payment`.
    Awarded {
        winner_id: UserId,
        payment: PaymentTrack,
    },
}

/// The mutable aggregate root of the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: AuctionId,
    pub vehicle: Vehicle,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub base_price: Decimal,
    pub current_bid: Decimal,
    pub bid_increment: Decimal,
    pub status: AuctionStatus,
    pub bids_count: u32,
    pub phase: SalePhase,
}

impl Auction {
    /// The outstanding submission, if the lot is under review.
    pub fn bid_submission(&self) -> Option<&BidSubmission> {
        match &self.phase {
            SalePhase::UnderReview { submission } => Some(submission),
            _ => None,
        }
    }

    /// True while a submission is locked for admin review.
    pub fn is_approval_pending(&self) -> bool {
        matches!(self.phase, SalePhase::UnderReview { .. })
    }

    /// Winner of the lot, once awarded.
    pub fn winner_id(&self) -> Option<&UserId> {
        match &self.phase {
            SalePhase::Awarded { winner_id, .. } => Some(winner_id),
            _ => None,
        }
    }

    /// Flat payment status derived from the sale phase.
    pub fn payment_status(&self) -> Option<PaymentProcessStatus> {
        match &self.phase {
            SalePhase::Open => None,
            SalePhase::UnderReview { .. } => Some(PaymentProcessStatus::AwaitingApproval),
            SalePhase::Awarded { payment, .. } => match payment {
                PaymentTrack::Untracked => None,
                PaymentTrack::OpenForPayment => Some(PaymentProcessStatus::OpenForPayment),
                PaymentTrack::Verifying { .. } => Some(PaymentProcessStatus::VerifyingPayment),
                PaymentTrack::Done { .. } => Some(PaymentProcessStatus::PaymentDone),
            },
        }
    }

    /// Bank transaction reference submitted by the winner, if any.
    pub fn payment_reference(&self) -> Option<&str> {
        match &self.phase {
            SalePhase::Awarded { payment, .. } => match payment {
                PaymentTrack::Verifying { reference } => Some(reference.as_str()),
                PaymentTrack::Done { reference } => reference.as_deref(),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Fixed 2% settlement surcharge applied on top of the winning bid.
///
/// The single definition used by both the display path and the
/// payment-completion activity, so the two can never drift.
pub fn final_settlement(current_bid: Decimal) -> Decimal {
    current_bid * Decimal::new(102, 2)
}
