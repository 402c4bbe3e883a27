// region:    --- Imports
use crate::auction::commands::{
    handle_add_comment as command_add_comment, handle_close_listing as command_close_listing,
    handle_create_listing as command_create_listing,
    handle_toggle_watchlist as command_toggle_watchlist, AddCommentCommand, CloseListingCommand,
    CreateListingCommand, ToggleWatchlistCommand,
};
use crate::auction::{category, model::Listing};
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::database::DatabaseManager;
use crate::error::EngineError;
use crate::query;
use crate::store::PostgresStore;
use crate::users::{handle_register_user, RegisterUserCommand};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

type AppState = (Arc<DatabaseManager>, Arc<PostgresStore>);

// region:    --- Command Handlers

/// Create a listing
pub async fn handle_create_listing(
    State((_, store)): State<AppState>,
    Json(cmd): Json<CreateListingCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> create listing request", "Handler");
    let listing = command_create_listing(cmd, &*store).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Place a bid
pub async fn handle_bid(
    State((_, store)): State<AppState>,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> bid request: {:?}", "Handler", cmd);
    let bid = handle_place_bid(cmd, &*store).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "bid accepted",
            "bid": bid,
        })),
    ))
}

/// Close a listing
pub async fn handle_close(
    State((_, store)): State<AppState>,
    Json(cmd): Json<CloseListingCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> close request: {:?}", "Handler", cmd);
    let listing = command_close_listing(cmd, &*store).await?;
    Ok(Json(listing))
}

/// Toggle a watchlist entry
pub async fn handle_toggle_watchlist(
    State((_, store)): State<AppState>,
    Json(cmd): Json<ToggleWatchlistCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> watchlist toggle: {:?}", "Handler", cmd);
    let outcome = command_toggle_watchlist(cmd, &*store).await?;
    Ok(Json(serde_json::json!({ "status": outcome })))
}

/// Add a comment
pub async fn handle_add_comment(
    State((_, store)): State<AppState>,
    Json(cmd): Json<AddCommentCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> comment request", "Handler");
    let comment = command_add_comment(cmd, &*store).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Register a user
pub async fn handle_register(
    State((_, store)): State<AppState>,
    Json(cmd): Json<RegisterUserCommand>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> register request", "Handler");
    let user = handle_register_user(cmd, &*store).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

#[derive(Debug, Deserialize)]
pub struct ListingsFilter {
    pub category: Option<String>,
}

/// Active listings, optionally filtered by category, with display price and
/// category label per listing.
pub async fn handle_get_listings(
    State((db_manager, _)): State<AppState>,
    Query(filter): Query<ListingsFilter>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> listings query: {:?}", "HandlerQuery", filter);
    let listings = match filter.category {
        Some(code) => query::handlers::get_active_listings_by_category(&db_manager, code).await?,
        None => query::handlers::get_active_listings(&db_manager).await?,
    };

    let mut data = Vec::with_capacity(listings.len());
    for listing in listings {
        data.push(listing_view(&db_manager, listing).await?);
    }
    Ok(Json(data))
}

/// Listing detail
pub async fn handle_get_listing(
    State((db_manager, _)): State<AppState>,
    Path(listing_id): Path<i64>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> listing query id: {}", "HandlerQuery", listing_id);
    let listing = query::handlers::get_listing(&db_manager, listing_id).await?;
    Ok(Json(listing_view(&db_manager, listing).await?))
}

/// Displayed price of a listing
pub async fn handle_get_current_price(
    State((db_manager, _)): State<AppState>,
    Path(listing_id): Path<i64>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> price query id: {}", "HandlerQuery", listing_id);
    let price = query::handlers::get_current_price(&db_manager, listing_id).await?;
    Ok(Json(serde_json::json!({ "current_price": price })))
}

/// Bid history of a listing
pub async fn handle_get_bid_history(
    State((db_manager, _)): State<AppState>,
    Path(listing_id): Path<i64>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> bid history id: {}", "HandlerQuery", listing_id);
    let history = query::handlers::get_bid_history(&db_manager, listing_id).await?;
    Ok(Json(history))
}

/// A user's watchlist
pub async fn handle_get_watchlist(
    State((db_manager, _)): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> watchlist query user: {}", "HandlerQuery", user_id);
    let listings = query::handlers::get_watchlist(&db_manager, user_id).await?;
    Ok(Json(listings))
}

/// Explicit watch-membership check
pub async fn handle_watch_check(
    State((db_manager, _)): State<AppState>,
    Path((user_id, listing_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, EngineError> {
    info!(
        "{:<12} --> watch check user {} listing {}",
        "HandlerQuery", user_id, listing_id
    );
    let watching = query::handlers::is_watching(&db_manager, user_id, listing_id).await?;
    Ok(Json(serde_json::json!({ "watching": watching })))
}

/// Comments on a listing
pub async fn handle_get_comments(
    State((db_manager, _)): State<AppState>,
    Path(listing_id): Path<i64>,
) -> Result<impl IntoResponse, EngineError> {
    info!("{:<12} --> comments query id: {}", "HandlerQuery", listing_id);
    let comments = query::handlers::get_comments(&db_manager, listing_id).await?;
    Ok(Json(comments))
}

/// Listing plus the derived display fields the pages need.
async fn listing_view(
    db_manager: &DatabaseManager,
    listing: Listing,
) -> Result<serde_json::Value, EngineError> {
    let current_price = query::handlers::get_current_price(db_manager, listing.id).await?;
    let label = listing
        .category
        .as_deref()
        .map_or(category::UNCATEGORIZED, category::label);
    Ok(serde_json::json!({
        "listing": listing,
        "current_price": current_price,
        "category_label": label,
    }))
}

// endregion: --- Query Handlers
