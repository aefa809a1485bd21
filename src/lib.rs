pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod importer;
pub mod notify;
pub mod seed;
pub mod store;
pub mod textgen;

pub use config::Config;
pub use db::{init_session_db, SessionStore};
pub use domain::{
    Auction, AuctionId, AuctionStatus, Decimal, Notification, PaymentProcessStatus, SalePhase,
    Severity, Territory, User, UserId, UserRole, Vehicle, VehicleId,
};
pub use engine::{LifecycleEngine, SimulatedBidFeed};
pub use error::AppError;
pub use notify::Notifier;
pub use store::AppStore;
pub use textgen::{GeminiTextGenerator, StaticTextGenerator, TextGenerator};
