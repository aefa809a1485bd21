//! Auction lifecycle engine.
//!
//! The state machine per lot runs bid submission -> admin approval or
//! rejection -> payment initiation -> settlement confirmation. Each operation
//! validates at the boundary, transitions the aggregate, appends an audit
//! activity, and emits a notification. Validation failures carry a typed
//! error and leave state untouched; precondition violations on admin
//! operations (approving a lot with no submission) are defensive no-ops.

use crate::db::SessionStore;
use crate::domain::{
    final_settlement, ActivityDraft, ActivityStatus, ActivityType, Auction, AuctionId,
    AuctionStatus, BidSubmission, PaymentTrack, SalePhase, Severity, Territory, User,
};
use crate::eligibility;
use crate::engine::activity::ActivityLog;
use crate::notify::Notifier;
use crate::store::AppStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("No active session")]
    NoActiveSession,
    #[error("Auction {0} not found")]
    AuctionNotFound(AuctionId),
    #[error("Auction is not live")]
    NotLive,
    #[error("KYC verification required before bidding")]
    KycRequired,
    #[error("Account is blocked from bidding")]
    AccountBlocked,
    #[error("Territory {0} is not in your bidding states")]
    TerritoryNotAuthorized(Territory),
    #[error("Bid must meet the floor price of {0}")]
    BidBelowFloor(Decimal),
    #[error("Settlement amount must be at least the bid amount")]
    SettlementBelowBid,
    #[error("Bid already registered for this floor")]
    DuplicateBid,
    #[error("Another submission is already under review")]
    SubmissionPending,
    #[error("A bank reference code is required")]
    MissingReference,
    #[error("Auction is not open for payment")]
    NotOpenForPayment,
    #[error("Bidding states exceed the cap of {0}")]
    TooManyBiddingStates(usize),
    #[error("Viewing states exceed the cap of {0}")]
    TooManyViewingStates(usize),
}

/// The single writer over the application store for lifecycle state.
#[derive(Clone)]
pub struct LifecycleEngine {
    store: Arc<AppStore>,
    log: ActivityLog,
    notifier: Arc<Notifier>,
    sessions: SessionStore,
}

impl LifecycleEngine {
    pub fn new(store: Arc<AppStore>, notifier: Arc<Notifier>, sessions: SessionStore) -> Self {
        let log = ActivityLog::new(store.clone(), sessions.clone());
        Self {
            store,
            log,
            notifier,
            sessions,
        }
    }

    // =========================================================================
    // Bid submission and review

    /// Submit a manual bid on a live lot for admin review.
    ///
    /// Eligibility is re-checked here regardless of what the caller already
    /// verified: a stale client must not be able to bypass the territory or
    /// KYC gates. At most one submission may be outstanding per lot, and a
    /// bidder may bid at most once per lot (enforced by scanning the activity
    /// history, not a counter).
    pub async fn submit_bid(
        &self,
        auction_id: &AuctionId,
        bid_amount: Decimal,
        settlement_amount: Decimal,
    ) -> Result<Auction, LifecycleError> {
        let bidder = self
            .store
            .current_user()
            .ok_or(LifecycleError::NoActiveSession)?;
        let auction = self
            .store
            .auction(auction_id)
            .ok_or_else(|| LifecycleError::AuctionNotFound(auction_id.clone()))?;

        if auction.status != AuctionStatus::Live {
            return Err(LifecycleError::NotLive);
        }
        if bidder.is_blocked {
            return Err(LifecycleError::AccountBlocked);
        }
        if !bidder.is_kyc_verified {
            return Err(LifecycleError::KycRequired);
        }
        if !eligibility::can_bid_on_territory(&bidder, &auction.vehicle.state) {
            return Err(LifecycleError::TerritoryNotAuthorized(
                auction.vehicle.state.clone(),
            ));
        }
        if bid_amount < auction.current_bid {
            return Err(LifecycleError::BidBelowFloor(auction.current_bid));
        }
        if settlement_amount < bid_amount {
            return Err(LifecycleError::SettlementBelowBid);
        }

        if bidder.has_bid_on(auction_id) {
            self.notifier.push(
                "Restriction: Bid already registered for this floor.",
                Severity::Warning,
            );
            return Err(LifecycleError::DuplicateBid);
        }
        if auction.is_approval_pending() {
            self.notifier.push(
                "Restriction: Another bid is already under review for this floor.",
                Severity::Warning,
            );
            return Err(LifecycleError::SubmissionPending);
        }

        let submission = BidSubmission {
            user_id: bidder.id.clone(),
            user_name: bidder.name.clone(),
            bid_amount,
            settlement_amount,
        };
        let updated = self
            .store
            .mutate_auction(auction_id, |a| {
                a.phase = SalePhase::UnderReview {
                    submission: submission.clone(),
                };
            })
            .ok_or_else(|| LifecycleError::AuctionNotFound(auction_id.clone()))?;

        let mut draft = ActivityDraft::new(
            ActivityType::BidSubmitted,
            format!("BID FLOOR: \u{20b9}{} locked for review.", bid_amount),
        );
        draft.amount = Some(bid_amount);
        draft.settlement_amount = Some(settlement_amount);
        draft.target_id = Some(auction_id.clone());
        draft.target_name = Some(updated.vehicle.model.clone());
        draft.status = Some(ActivityStatus::Pending);
        self.log.record(&bidder.id, draft).await;

        info!("Bid {} submitted on {} by {}", bid_amount, auction_id, bidder.id);
        self.notifier.push(
            "Bid added successfully. Admin review initiated.",
            Severity::Success,
        );
        Ok(updated)
    }

    /// Approve the pending submission: assign the winner, close the lot, and
    /// open the payment window. A lot without a pending submission is a
    /// defensive no-op.
    pub async fn approve_bid(&self, auction_id: &AuctionId) -> Option<Auction> {
        let auction = self.store.auction(auction_id)?;
        let submission = auction.bid_submission()?.clone();

        let updated = self.store.mutate_auction(auction_id, |a| {
            a.current_bid = submission.bid_amount;
            a.status = AuctionStatus::Closed;
            a.phase = SalePhase::Awarded {
                winner_id: submission.user_id.clone(),
                payment: PaymentTrack::OpenForPayment,
            };
        })?;

        let mut draft = ActivityDraft::new(
            ActivityType::Bid,
            format!(
                "APPROVAL GRANTED: Asset {} assigned. Awaiting Deposit.",
                auction_id
            ),
        );
        draft.status = Some(ActivityStatus::Success);
        draft.target_id = Some(auction_id.clone());
        draft.target_name = Some(updated.vehicle.model.clone());
        draft.amount = Some(submission.bid_amount);
        self.log.record(&submission.user_id, draft).await;

        info!("Bid on {} approved for {}", auction_id, submission.user_id);
        self.notifier.push(
            format!(
                "Bid for {} Approved. Payment portal opened for bidder.",
                auction_id
            ),
            Severity::Success,
        );
        Some(updated)
    }

    /// Reject the pending submission and reopen the lot for new bids. The
    /// listing status is unchanged. A lot without a pending submission is a
    /// defensive no-op.
    pub async fn reject_bid(&self, auction_id: &AuctionId) -> Option<Auction> {
        let auction = self.store.auction(auction_id)?;
        let submission = auction.bid_submission()?.clone();

        let updated = self.store.mutate_auction(auction_id, |a| {
            a.phase = SalePhase::Open;
        })?;

        let mut draft = ActivityDraft::new(
            ActivityType::Bid,
            format!("BOARD REJECTION: Asset {} offer declined.", auction_id),
        );
        draft.status = Some(ActivityStatus::Rejected);
        draft.target_id = Some(auction_id.clone());
        draft.target_name = Some(updated.vehicle.model.clone());
        self.log.record(&submission.user_id, draft).await;

        self.notifier
            .push(format!("Bid for {} rejected.", auction_id), Severity::Warning);
        Some(updated)
    }

    // =========================================================================
    // Settlement

    /// Record the winner's bank transaction reference and move the lot into
    /// verification.
    pub async fn initiate_payment(
        &self,
        auction_id: &AuctionId,
        reference: &str,
    ) -> Result<Auction, LifecycleError> {
        let user = self
            .store
            .current_user()
            .ok_or(LifecycleError::NoActiveSession)?;
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(LifecycleError::MissingReference);
        }

        let auction = self
            .store
            .auction(auction_id)
            .ok_or_else(|| LifecycleError::AuctionNotFound(auction_id.clone()))?;
        let winner_id = match &auction.phase {
            SalePhase::Awarded {
                winner_id,
                payment: PaymentTrack::OpenForPayment,
            } => winner_id.clone(),
            _ => return Err(LifecycleError::NotOpenForPayment),
        };

        let updated = self
            .store
            .mutate_auction(auction_id, |a| {
                a.phase = SalePhase::Awarded {
                    winner_id: winner_id.clone(),
                    payment: PaymentTrack::Verifying {
                        reference: reference.to_string(),
                    },
                };
            })
            .ok_or_else(|| LifecycleError::AuctionNotFound(auction_id.clone()))?;

        let mut draft = ActivityDraft::new(
            ActivityType::PaymentInitiated,
            format!("Submitted Reference ID: {}", reference),
        );
        draft.target_id = Some(auction_id.clone());
        self.log.record(&user.id, draft).await;

        self.notifier.push(
            "Reference received. Verifying with Bank Accounts.",
            Severity::Success,
        );
        Ok(updated)
    }

    /// Confirm the settlement. Only a lot under payment verification can be
    /// confirmed; anything else is a defensive no-op (the admin queue filter
    /// is not trusted as the sole gate).
    pub async fn confirm_payment(&self, auction_id: &AuctionId) -> Option<Auction> {
        let auction = self.store.auction(auction_id)?;
        let (winner_id, reference) = match &auction.phase {
            SalePhase::Awarded {
                winner_id,
                payment: PaymentTrack::Verifying { reference },
            } => (winner_id.clone(), Some(reference.clone())),
            _ => return None,
        };

        let updated = self.store.mutate_auction(auction_id, |a| {
            a.phase = SalePhase::Awarded {
                winner_id: winner_id.clone(),
                payment: PaymentTrack::Done {
                    reference: reference.clone(),
                },
            };
        })?;

        // The settlement figure must match the display computation exactly.
        let settled = final_settlement(updated.current_bid);
        let mut draft = ActivityDraft::new(
            ActivityType::PaymentComplete,
            format!(
                "PAYMENT VERIFIED: {} release NOC generated.",
                updated.vehicle.model
            ),
        );
        draft.amount = Some(settled);
        draft.target_id = Some(auction_id.clone());
        draft.target_name = Some(updated.vehicle.model.clone());
        draft.status = Some(ActivityStatus::Success);
        self.log.record(&winner_id, draft).await;

        info!("Payment for {} confirmed at {}", auction_id, settled);
        self.notifier.push(
            "Payment confirmed. Asset settlement complete.",
            Severity::Success,
        );
        Some(updated)
    }

    // =========================================================================
    // Session and account operations

    /// Authenticate and open a session. Persists the snapshot so a restart
    /// resumes logged in.
    pub async fn login(&self, user_id: &str, password: &str) -> Option<User> {
        let user = self
            .store
            .users()
            .into_iter()
            .find(|u| u.id.as_str() == user_id && u.password.as_deref() == Some(password))?;

        self.store.set_current_user(Some(user.id.clone()));
        if let Err(e) = self.sessions.save_user(&user).await {
            warn!("Failed to persist session for {}: {}", user.id, e);
        }
        self.log
            .record(
                &user.id,
                ActivityDraft::new(ActivityType::Login, "Bidding session secured."),
            )
            .await;
        self.store.current_user()
    }

    /// Close the session and drop the persisted snapshot.
    pub async fn logout(&self) {
        self.store.set_current_user(None);
        if let Err(e) = self.sessions.clear_user().await {
            warn!("Failed to clear persisted session: {}", e);
        }
    }

    /// Toggle a lot on the watchlist, persisting the id set. Returns true
    /// when the lot is now watched.
    pub async fn toggle_watchlist(&self, auction_id: &AuctionId) -> Result<bool, LifecycleError> {
        let user = self
            .store
            .current_user()
            .ok_or(LifecycleError::NoActiveSession)?;
        let added = self.store.toggle_watch(auction_id);

        if let Err(e) = self.sessions.save_watchlist(&self.store.watchlist()).await {
            warn!("Failed to persist watchlist: {}", e);
        }
        if added {
            let mut draft = ActivityDraft::new(
                ActivityType::WatchlistAdd,
                format!("Asset {} added to watchlist.", auction_id),
            );
            draft.target_id = Some(auction_id.clone());
            self.log.record(&user.id, draft).await;
        }
        Ok(added)
    }

    /// Update the current user's declared turnovers and territory selections,
    /// enforcing the tier cap on bidding states and the fixed viewing cap.
    /// The cap is evaluated against the newly declared three-month turnover.
    pub async fn update_declaration(
        &self,
        bidding_states: Vec<Territory>,
        viewing_states: Vec<Territory>,
        monthly_turnover: Option<Decimal>,
        three_month_turnover: Option<Decimal>,
    ) -> Result<User, LifecycleError> {
        let user = self
            .store
            .current_user()
            .ok_or(LifecycleError::NoActiveSession)?;

        let mut projected = user.clone();
        projected.three_month_turnover = three_month_turnover;
        let bidding_cap = eligibility::max_bidding_states(&projected);
        if bidding_states.len() > bidding_cap {
            return Err(LifecycleError::TooManyBiddingStates(bidding_cap));
        }
        if viewing_states.len() > eligibility::MAX_VIEWING_STATES {
            return Err(LifecycleError::TooManyViewingStates(
                eligibility::MAX_VIEWING_STATES,
            ));
        }

        self.store.mutate_user(&user.id, |u| {
            u.bidding_states = bidding_states;
            u.viewing_states = viewing_states;
            u.monthly_turnover = monthly_turnover;
            u.three_month_turnover = three_month_turnover;
        });
        self.log
            .record(
                &user.id,
                ActivityDraft::new(
                    ActivityType::DeclarationUpdate,
                    "Territory and turnover declaration updated.",
                ),
            )
            .await;

        self.store
            .user(&user.id)
            .ok_or(LifecycleError::NoActiveSession)
    }

    /// Mark the current user KYC-verified.
    pub async fn verify_kyc(&self) -> Result<User, LifecycleError> {
        let user = self
            .store
            .current_user()
            .ok_or(LifecycleError::NoActiveSession)?;
        self.store.mutate_user(&user.id, |u| u.is_kyc_verified = true);
        self.log
            .record(
                &user.id,
                ActivityDraft::new(
                    ActivityType::KycSubmit,
                    "High Volume Bidding KYC Verified.",
                ),
            )
            .await;
        self.store
            .user(&user.id)
            .ok_or(LifecycleError::NoActiveSession)
    }
}
