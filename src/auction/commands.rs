/// Listing lifecycle commands: create, close, watchlist toggle, comments.
// region:    --- Imports
use crate::auction::category;
use crate::auction::model::{Comment, Listing, NewListing, WatchToggle};
use crate::error::EngineError;
use crate::store::AuctionStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// Create-listing command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateListingCommand {
    pub title: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub img_url: Option<String>,
    pub category: Option<String>,
    pub creator_id: i64,
}

/// Close-listing command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CloseListingCommand {
    pub listing_id: i64,
    pub requesting_user: i64,
}

/// Watchlist toggle command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToggleWatchlistCommand {
    pub listing_id: i64,
    pub user_id: i64,
}

/// Add-comment command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddCommentCommand {
    pub listing_id: i64,
    pub author_id: i64,
    pub text: String,
}

/// Create a new active listing with no bids and no winner.
pub async fn handle_create_listing(
    cmd: CreateListingCommand,
    store: &impl AuctionStore,
) -> Result<Listing, EngineError> {
    info!("{:<12} --> create listing: {:?}", "Command", cmd.title);

    if cmd.title.trim().is_empty() {
        return Err(EngineError::Validation("title must not be empty".into()));
    }
    if cmd.description.trim().is_empty() {
        return Err(EngineError::Validation(
            "description must not be empty".into(),
        ));
    }
    if cmd.starting_bid.is_sign_negative() {
        return Err(EngineError::Validation(
            "starting bid must not be negative".into(),
        ));
    }
    if let Some(code) = cmd.category.as_deref() {
        if !category::is_valid(code) {
            return Err(EngineError::Validation(format!(
                "unknown category code: {code}"
            )));
        }
    }

    store
        .insert_listing(NewListing {
            title: cmd.title,
            description: cmd.description,
            starting_bid: cmd.starting_bid,
            img_url: cmd.img_url,
            category: cmd.category,
            creator_id: cmd.creator_id,
        })
        .await
}

/// Close a listing: creator only, active only. The highest bidder becomes the
/// winner; a listing that never drew a bid closes without one. Closed is
/// terminal.
pub async fn handle_close_listing(
    cmd: CloseListingCommand,
    store: &impl AuctionStore,
) -> Result<Listing, EngineError> {
    info!("{:<12} --> close listing: {:?}", "Command", cmd);

    let listing = store.listing(cmd.listing_id).await?;

    if listing.creator_id != cmd.requesting_user {
        return Err(EngineError::Permission);
    }
    if !listing.active {
        return Err(EngineError::AlreadyClosed);
    }

    // The store closes and picks the winner atomically; a concurrent close
    // that got there first shows up as no row.
    match store.finalize_listing(cmd.listing_id).await? {
        Some(closed) => {
            info!(
                "{:<12} --> listing {} closed, winner: {:?}",
                "Command", closed.id, closed.winner_id
            );
            Ok(closed)
        }
        None => Err(EngineError::AlreadyClosed),
    }
}

/// Toggle a listing on or off a user's watchlist. Succeeds on both branches.
pub async fn handle_toggle_watchlist(
    cmd: ToggleWatchlistCommand,
    store: &impl AuctionStore,
) -> Result<WatchToggle, EngineError> {
    info!("{:<12} --> toggle watchlist: {:?}", "Command", cmd);

    // Unknown listings fail here rather than leaving dangling entries.
    store.listing(cmd.listing_id).await?;

    store.toggle_watchlist(cmd.user_id, cmd.listing_id).await
}

/// Append a comment to a listing. Comments stay open after closing.
pub async fn handle_add_comment(
    cmd: AddCommentCommand,
    store: &impl AuctionStore,
) -> Result<Comment, EngineError> {
    info!(
        "{:<12} --> add comment on listing {}",
        "Command", cmd.listing_id
    );

    if cmd.text.trim().is_empty() {
        return Err(EngineError::Validation(
            "comment text must not be empty".into(),
        ));
    }

    store.listing(cmd.listing_id).await?;

    store
        .insert_comment(cmd.listing_id, cmd.author_id, &cmd.text)
        .await
}

// endregion: --- Commands
