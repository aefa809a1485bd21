use auctionfloor::textgen::{GeminiTextGenerator, StaticTextGenerator, TextGenerator};
use auctionfloor::{
    api, config::Config, db::init_session_db, seed, AppStore, LifecycleEngine, Notifier,
    SessionStore, SimulatedBidFeed,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize the session database
    let pool = match init_session_db(&config.session_db_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize session database: {}", e);
            std::process::exit(1);
        }
    };
    let sessions = SessionStore::new(pool);

    // Seed the in-process registries
    let store = Arc::new(AppStore::new(seed::seed_users(), seed::seed_auctions()));

    // Resume a persisted session, if one exists and still names a known user
    match sessions.load_user().await {
        Ok(Some(saved)) => {
            if store.user(&saved.id).is_some() {
                store.set_current_user(Some(saved.id.clone()));
                tracing::info!("Resumed session for {}", saved.id);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not load persisted session: {}", e),
    }
    match sessions.load_watchlist().await {
        Ok(ids) if !ids.is_empty() => store.restore_watchlist(ids),
        Ok(_) => {}
        Err(e) => tracing::warn!("Could not load persisted watchlist: {}", e),
    }

    let notifier = Notifier::new();
    let sim = SimulatedBidFeed::new(
        store.clone(),
        Duration::from_millis(config.sim_bid_interval_ms),
    );
    let engine = LifecycleEngine::new(store.clone(), notifier.clone(), sessions);

    let textgen: Arc<dyn TextGenerator> = match config.genai_api_key.clone() {
        Some(key) => Arc::new(GeminiTextGenerator::new(
            config.genai_api_url.clone(),
            key,
            config.genai_model.clone(),
        )),
        None => {
            tracing::info!("No GENAI_API_KEY set; using canned summaries");
            Arc::new(StaticTextGenerator::new())
        }
    };

    // Create router
    let app = api::create_router(api::AppState {
        store,
        engine,
        notifier,
        sim,
        textgen,
    });

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Auction portal listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
