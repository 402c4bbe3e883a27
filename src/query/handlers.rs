// region:    --- Imports
use super::queries;
use crate::auction::model::{Bid, Comment, Listing};
use crate::database::DatabaseManager;
use rust_decimal::Decimal;
use sqlx::Error as SqlxError;
use sqlx::Row;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// Listing lookup
pub async fn get_listing(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Listing, SqlxError> {
    info!("{:<12} --> listing lookup id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// All active listings
pub async fn get_active_listings(db_manager: &DatabaseManager) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> active listings", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// Active listings in one category
pub async fn get_active_listings_by_category(
    db_manager: &DatabaseManager,
    category: String,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> active listings in category {}", "Query", category);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS_BY_CATEGORY)
                    .bind(category)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// Displayed price of a listing
pub async fn get_current_price(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Decimal, SqlxError> {
    info!("{:<12} --> current price id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(queries::GET_CURRENT_PRICE)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(result.get("current_price"))
            })
        })
        .await
}

/// Bid history of a listing
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> bid history id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// Listings on a user's watchlist
pub async fn get_watchlist(
    db_manager: &DatabaseManager,
    watcher_id: i64,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> watchlist for user: {}", "Query", watcher_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_WATCHLIST)
                    .bind(watcher_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// Explicit watch-membership check
pub async fn is_watching(
    db_manager: &DatabaseManager,
    watcher_id: i64,
    listing_id: i64,
) -> Result<bool, SqlxError> {
    info!(
        "{:<12} --> watch check user {} listing {}",
        "Query", watcher_id, listing_id
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(queries::IS_WATCHING)
                    .bind(watcher_id)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(result.get("watching"))
            })
        })
        .await
}

/// Comments on a listing
pub async fn get_comments(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Vec<Comment>, SqlxError> {
    info!("{:<12} --> comments id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Comment>(queries::GET_COMMENTS)
                    .bind(listing_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Query Handlers
