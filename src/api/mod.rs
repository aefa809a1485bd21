pub mod admin;
pub mod auctions;
pub mod auth;
pub mod bids;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod watchlist;

use crate::engine::{LifecycleEngine, SimulatedBidFeed};
use crate::notify::Notifier;
use crate::store::AppStore;
use crate::textgen::TextGenerator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AppStore>,
    pub engine: LifecycleEngine,
    pub notifier: Arc<Notifier>,
    pub sim: Arc<SimulatedBidFeed>,
    pub textgen: Arc<dyn TextGenerator>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/logout", post(auth::logout))
        .route("/v1/auctions", get(auctions::list_auctions))
        .route("/v1/auctions/:id", get(auctions::get_auction))
        .route("/v1/auctions/:id/leaderboard", get(auctions::get_leaderboard))
        .route("/v1/auctions/:id/feed/close", post(auctions::close_feed))
        .route("/v1/auctions/:id/summary", get(auctions::get_summary))
        .route("/v1/auctions/:id/bids", post(bids::submit_bid))
        .route("/v1/auctions/:id/payment", post(bids::initiate_payment))
        .route("/v1/admin/pending", get(admin::pending_bids))
        .route("/v1/admin/payments", get(admin::payment_queue))
        .route("/v1/admin/auctions/:id/approve", post(admin::approve_bid))
        .route("/v1/admin/auctions/:id/reject", post(admin::reject_bid))
        .route(
            "/v1/admin/auctions/:id/confirm-payment",
            post(admin::confirm_payment),
        )
        .route("/v1/admin/import", post(admin::import_lots))
        .route("/v1/admin/validate", post(admin::validate_lots))
        .route("/v1/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/v1/profile/kyc", post(profile::verify_kyc))
        .route("/v1/watchlist", get(watchlist::get_watchlist))
        .route("/v1/watchlist/:id/toggle", post(watchlist::toggle))
        .route("/v1/notifications", get(notifications::list))
        .layer(cors)
        .with_state(state)
}
