// region:    --- Imports
use crate::config::Config;
use crate::database::DatabaseManager;
use crate::store::PostgresStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod config;
mod database;
mod error;
mod handlers;
mod query;
mod store;
mod users;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging setup
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::load();

    let db_manager = Arc::new(DatabaseManager::new(&config).await);

    // schema bootstrap
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> database initialization failed: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> database initialized", "Main");

    let store = Arc::new(PostgresStore::new(db_manager.get_pool()));

    // cors setup for browser clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // router setup
    let routes_all = Router::new()
        .route(
            "/listings",
            post(handlers::handle_create_listing).get(handlers::handle_get_listings),
        )
        .route("/listings/:id", get(handlers::handle_get_listing))
        .route("/listings/:id/price", get(handlers::handle_get_current_price))
        .route("/listings/:id/bids", get(handlers::handle_get_bid_history))
        .route(
            "/listings/:id/comments",
            get(handlers::handle_get_comments),
        )
        .route("/bid", post(handlers::handle_bid))
        .route("/close", post(handlers::handle_close))
        .route("/comments", post(handlers::handle_add_comment))
        .route("/watchlist", post(handlers::handle_toggle_watchlist))
        .route("/watchlist/:user_id", get(handlers::handle_get_watchlist))
        .route(
            "/watchlist/:user_id/:listing_id",
            get(handlers::handle_watch_check),
        )
        .route("/register", post(handlers::handle_register))
        .layer(cors)
        .with_state((db_manager, store));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
