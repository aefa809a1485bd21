//! Domain types for the bank-asset auction portal.

pub mod auction;
pub mod notification;
pub mod primitives;
pub mod user;
pub mod vehicle;

pub use auction::{
    final_settlement, Auction, AuctionStatus, BidSubmission, PaymentProcessStatus, PaymentTrack,
    SalePhase,
};
pub use notification::{Notification, Severity};
pub use primitives::{AuctionId, Territory, UserId, VehicleId, INDIAN_STATES};
pub use rust_decimal::Decimal;
pub use user::{ActivityDraft, ActivityStatus, ActivityType, User, UserActivity, UserRole};
pub use vehicle::Vehicle;
