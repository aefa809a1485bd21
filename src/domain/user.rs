//! User account, role, and the append-only activity audit trail.

use crate::domain::{AuctionId, Territory, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portal role. PUBLIC users can browse their viewing territories but never bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Bidder,
    Public,
}

/// Activity entry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Bid,
    Login,
    KycSubmit,
    WatchlistAdd,
    PaymentInitiated,
    PaymentComplete,
    BidSubmitted,
    DeclarationUpdate,
}

/// Outcome tag carried by some activity entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Success,
    Failed,
    Pending,
    Rejected,
}

/// A single append-only audit record. Never mutated or deleted after creation;
/// the activity history is the sole source of truth for "has this user already
/// bid on this auction".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<AuctionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
}

/// The mutable fields of an activity before the log assigns identity and time.
#[derive(Debug, Clone, Default)]
pub struct ActivityDraft {
    pub activity_type: Option<ActivityType>,
    pub description: String,
    pub amount: Option<Decimal>,
    pub settlement_amount: Option<Decimal>,
    pub target_id: Option<AuctionId>,
    pub target_name: Option<String>,
    pub status: Option<ActivityStatus>,
}

impl ActivityDraft {
    pub fn new(activity_type: ActivityType, description: impl Into<String>) -> Self {
        ActivityDraft {
            activity_type: Some(activity_type),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Seal the draft into a full activity with a fresh id and timestamp.
    pub fn seal(self) -> UserActivity {
        UserActivity {
            id: Uuid::new_v4().simple().to_string(),
            activity_type: self.activity_type.unwrap_or(ActivityType::Bid),
            description: self.description,
            timestamp: Utc::now(),
            amount: self.amount,
            settlement_amount: self.settlement_amount,
            target_id: self.target_id,
            target_name: self.target_name,
            status: self.status,
        }
    }
}

/// A registered portal account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Mock credential; never serialized, so neither API responses nor the
    /// persisted session snapshot carry it.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_kyc_verified: bool,
    pub state: Territory,
    pub district: String,
    pub city: String,
    pub bidding_states: Vec<Territory>,
    pub viewing_states: Vec<Territory>,
    pub registration_expiry: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    /// Ordered newest-first.
    pub activity_history: Vec<UserActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_month_turnover: Option<Decimal>,
}

impl User {
    /// True if this user's audit trail already carries a `BID_SUBMITTED`
    /// entry for the given auction. Linear scan of the history, which is the
    /// load-bearing duplicate-bid guard.
    pub fn has_bid_on(&self, auction_id: &AuctionId) -> bool {
        self.activity_history.iter().any(|act| {
            act.activity_type == ActivityType::BidSubmitted
                && act.target_id.as_ref() == Some(auction_id)
        })
    }

    pub fn monthly_turnover_or_zero(&self) -> Decimal {
        self.monthly_turnover.unwrap_or_default()
    }

    pub fn three_month_turnover_or_zero(&self) -> Decimal {
        self.three_month_turnover.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bidder() -> User {
        User {
            id: UserId::new("bidder01"),
            password: Some("pass".to_string()),
            name: "User 1".to_string(),
            email: "bidder01@example.com".to_string(),
            role: UserRole::Bidder,
            is_kyc_verified: true,
            state: Territory::new("Maharashtra"),
            district: "Mumbai City".to_string(),
            city: "Mumbai".to_string(),
            bidding_states: vec![Territory::new("Maharashtra")],
            viewing_states: vec![Territory::new("Maharashtra")],
            registration_expiry: None,
            is_blocked: false,
            activity_history: Vec::new(),
            monthly_turnover: None,
            three_month_turnover: None,
        }
    }

    #[test]
    fn test_has_bid_on_scans_type_and_target() {
        let mut user = bidder();
        let lot = AuctionId::new("BANK-REPO-2024-100");
        assert!(!user.has_bid_on(&lot));

        let mut draft = ActivityDraft::new(ActivityType::BidSubmitted, "bid locked");
        draft.target_id = Some(lot.clone());
        user.activity_history.insert(0, draft.seal());
        assert!(user.has_bid_on(&lot));

        // A watchlist entry for the same lot does not count as a bid.
        let mut other = ActivityDraft::new(ActivityType::WatchlistAdd, "watch");
        other.target_id = Some(AuctionId::new("BANK-REPO-2024-101"));
        user.activity_history.insert(0, other.seal());
        assert!(!user.has_bid_on(&AuctionId::new("BANK-REPO-2024-101")));
    }

    #[test]
    fn test_seal_assigns_identity_and_timestamp() {
        let a = ActivityDraft::new(ActivityType::Login, "session secured").seal();
        let b = ActivityDraft::new(ActivityType::Login, "session secured").seal();
        assert_ne!(a.id, b.id);
        assert_eq!(a.activity_type, ActivityType::Login);
    }

    #[test]
    fn test_activity_type_serialization() {
        let json = serde_json::to_string(&ActivityType::BidSubmitted).unwrap();
        assert_eq!(json, "\"BID_SUBMITTED\"");
        let json = serde_json::to_string(&ActivityStatus::Rejected).unwrap();
        assert_eq!(json, "\"REJECTED\"");
    }
}
