use auctionfloor::api;
use auctionfloor::db::init_session_db;
use auctionfloor::textgen::{StaticTextGenerator, TextGenerator, ValidationFinding};
use auctionfloor::{seed, AppStore, LifecycleEngine, Notifier, SessionStore, SimulatedBidFeed};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

async fn setup_test_app(textgen: Arc<dyn TextGenerator>) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("session.db")
        .to_string_lossy()
        .to_string();
    let pool = init_session_db(&db_path).await.expect("init_session_db failed");
    let sessions = SessionStore::new(pool);

    let store = Arc::new(AppStore::new(seed::seed_users(), seed::seed_auctions()));
    let notifier = Notifier::new();
    let sim = SimulatedBidFeed::new(store.clone(), Duration::from_secs(3600));
    let engine = LifecycleEngine::new(store.clone(), notifier.clone(), sessions);

    let app = api::create_router(api::AppState {
        store,
        engine,
        notifier,
        sim,
        textgen,
    });

    TestApp {
        app,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let req = match body {
        Some(v) => builder
            .body(axum::body::Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login(app: &axum::Router, user_id: &str, password: &str) {
    let (status, _) = request(
        app.clone(),
        "POST",
        "/v1/auth/login",
        Some(json!({ "userId": user_id, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {}", user_id);
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;

    let (status, _) = request(t.app.clone(), "GET", "/v1/admin/pending", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&t.app, "bidder02", "pass").await;
    let (status, _) = request(t.app.clone(), "GET", "/v1/admin/pending", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = request(t.app.clone(), "GET", "/v1/admin/payments", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pending_queue_flags_high_volume_bidders() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;

    // bidder11 declares 15 lakh monthly; bidder02 only 1.5 lakh.
    login(&t.app, "bidder11", "pass").await;
    let (status, _) = request(t.app.clone(), "POST", "/v1/profile/kyc", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/auctions/BANK-REPO-2024-100/bids",
        Some(json!({ "bidAmount": 600_000, "settlementAmount": 620_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(&t.app, "bidder02", "pass").await;
    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/auctions/BANK-REPO-2024-101/bids",
        Some(json!({ "bidAmount": 540_000, "settlementAmount": 550_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    login(&t.app, "admin01", "admin").await;
    let (status, pending) = request(t.app.clone(), "GET", "/v1/admin/pending", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = pending.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let by_id = |id: &str| entries.iter().find(|e| e["id"] == id).unwrap();
    let elite = by_id("BANK-REPO-2024-100");
    assert_eq!(elite["isHighVolume"], true);
    assert_eq!(elite["bidderTurnover"].as_f64(), Some(1_500_000.0));
    let standard = by_id("BANK-REPO-2024-101");
    assert_eq!(standard["isHighVolume"], false);
}

#[tokio::test]
async fn test_approve_without_submission_leaves_lot_unchanged() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;
    login(&t.app, "admin01", "admin").await;

    let (status, body) = request(
        t.app.clone(),
        "POST",
        "/v1/admin/auctions/BANK-REPO-2024-100/approve",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "LIVE");
    assert_eq!(body["isApprovalPending"], false);
    assert!(body.get("winnerId").is_none());
}

#[tokio::test]
async fn test_approve_unknown_lot_not_found() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;
    login(&t.app, "admin01", "admin").await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/admin/auctions/BANK-REPO-2024-999/approve",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_confirm_payment_skips_lots_not_under_verification() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;
    login(&t.app, "admin01", "admin").await;

    // Lot 130 is seeded closed with a historical winner but no settlement
    // tracking; confirming must not invent one.
    let (status, body) = request(
        t.app.clone(),
        "POST",
        "/v1/admin/auctions/BANK-REPO-2024-130/confirm-payment",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CLOSED");
    assert!(body.get("paymentStatus").is_none());
}

#[tokio::test]
async fn test_csv_import_stages_valid_rows_and_reports_bad_ones() {
    let t = setup_test_app(Arc::new(StaticTextGenerator::new())).await;
    login(&t.app, "admin01", "admin").await;

    let csv = "Make,Model,Year,VIN,FuelType,Kms,State,BasePrice,Increment,StartTime,DurationMins\n\
               Maruti,Baleno Alpha,2021,INB123499X,Petrol,30000,Karnataka,350000,5000,2026-09-01T10:00:00Z,120\n\
               Tata,Harrier,2022,INH123599X,Diesel,25000,Gujarat,0,5000,2026-09-01T10:00:00Z,120\n";
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/admin/import")
        .header("content-type", "text/csv")
        .body(axum::body::Body::from(csv))
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["imported"], 1);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    // The staged lot is visible to the admin but not yet live.
    let (status, lots) = request(t.app.clone(), "GET", "/v1/auctions?status=STAGING", None).await;
    assert_eq!(status, StatusCode::OK);
    let lots = lots.as_array().unwrap();
    assert_eq!(lots.len(), 1);
    assert!(lots[0]["id"].as_str().unwrap().starts_with("BANK-IMP-"));
    assert_eq!(lots[0]["vehicle"]["model"], "Baleno Alpha");
}

#[tokio::test]
async fn test_validate_returns_generator_findings() {
    let textgen = StaticTextGenerator::new().with_findings(vec![ValidationFinding {
        row: Some(2),
        field: Some("Kms".to_string()),
        issue: "Odometer reading looks implausible".to_string(),
    }]);
    let t = setup_test_app(Arc::new(textgen)).await;
    login(&t.app, "admin01", "admin").await;

    let (status, findings) = request(
        t.app.clone(),
        "POST",
        "/v1/admin/validate",
        Some(json!([{ "Make": "Tata", "Kms": 9_999_999 }])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(findings.as_array().unwrap().len(), 1);
    assert_eq!(findings[0]["field"], "Kms");
}
