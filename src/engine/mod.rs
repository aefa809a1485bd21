//! Lifecycle engine, activity log, and the simulated bid feed.

pub mod activity;
pub mod lifecycle;
pub mod sim;

pub use activity::ActivityLog;
pub use lifecycle::{LifecycleEngine, LifecycleError};
pub use sim::{SimEntry, SimulatedBidFeed};
