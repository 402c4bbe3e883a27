// region:    --- Imports
use crate::auction::model::{Bid, Comment, Listing, NewListing, User, WatchToggle};
use crate::error::EngineError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

// endregion: --- Imports

// region:    --- Store Trait

/// Persistence seam for the auction engine. The write operations carry the
/// isolation the bidding rules need: `append_bid` is a compare-and-swap
/// against the maximum the caller observed, and `finalize_listing` computes
/// the winner and deactivates the listing in one atomic unit.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn insert_listing(&self, new: NewListing) -> Result<Listing, EngineError>;

    async fn listing(&self, listing_id: i64) -> Result<Listing, EngineError>;

    /// Highest bid on a listing, ties broken by earliest placement.
    async fn highest_bid(&self, listing_id: i64) -> Result<Option<Bid>, EngineError>;

    /// Insert a bid only if the listing is still active and its current
    /// maximum still equals `observed_max`. `Ok(None)` means the observation
    /// went stale and the caller must re-read and re-validate.
    async fn append_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
        observed_max: Option<Decimal>,
    ) -> Result<Option<Bid>, EngineError>;

    /// Deactivate the listing and assign the highest bidder as winner in one
    /// atomic unit. `Ok(None)` means the listing was already closed.
    async fn finalize_listing(&self, listing_id: i64) -> Result<Option<Listing>, EngineError>;

    /// Remove the (watcher, listing) entry if present, create it otherwise.
    async fn toggle_watchlist(
        &self,
        watcher_id: i64,
        listing_id: i64,
    ) -> Result<WatchToggle, EngineError>;

    async fn insert_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, EngineError>;

    /// Create a user; a duplicate username surfaces as `UserExists`.
    async fn insert_user(&self, username: &str, email: &str) -> Result<User, EngineError>;
}

// endregion: --- Store Trait

// region:    --- Postgres Store

/// `AuctionStore` backed by Postgres.
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for PostgresStore {
    async fn insert_listing(&self, new: NewListing) -> Result<Listing, EngineError> {
        let listing = sqlx::query_as::<_, Listing>(
            "INSERT INTO listings (title, description, starting_bid, img_url, category, active, creator_id)
             VALUES ($1, $2, $3, $4, $5, TRUE, $6)
             RETURNING id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.starting_bid)
        .bind(&new.img_url)
        .bind(&new.category)
        .bind(new.creator_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(listing)
    }

    async fn listing(&self, listing_id: i64) -> Result<Listing, EngineError> {
        let listing = sqlx::query_as::<_, Listing>(
            "SELECT id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at
             FROM listings WHERE id = $1",
        )
        .bind(listing_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(listing)
    }

    async fn highest_bid(&self, listing_id: i64) -> Result<Option<Bid>, EngineError> {
        let bid = sqlx::query_as::<_, Bid>(
            "SELECT id, listing_id, bidder_id, amount, placed_at
             FROM bids
             WHERE listing_id = $1
             ORDER BY amount DESC, placed_at ASC
             LIMIT 1",
        )
        .bind(listing_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(bid)
    }

    async fn append_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
        observed_max: Option<Decimal>,
    ) -> Result<Option<Bid>, EngineError> {
        let mut tx = self.pool.begin().await?;

        // The listing row lock is the per-listing mutual-exclusion scope:
        // concurrent bids and closes on the same listing queue behind it.
        let active: Option<bool> =
            sqlx::query_scalar("SELECT active FROM listings WHERE id = $1 FOR UPDATE")
                .bind(listing_id)
                .fetch_optional(&mut *tx)
                .await?;
        if active != Some(true) {
            tx.rollback().await?;
            return Ok(None);
        }

        // Re-check the maximum under the lock; a stale observation means the
        // caller lost a race and must re-validate.
        let current_max: Option<Decimal> =
            sqlx::query_scalar("SELECT MAX(amount) FROM bids WHERE listing_id = $1")
                .bind(listing_id)
                .fetch_one(&mut *tx)
                .await?;
        if current_max != observed_max {
            tx.rollback().await?;
            return Ok(None);
        }

        let bid = sqlx::query_as::<_, Bid>(
            "INSERT INTO bids (listing_id, bidder_id, amount)
             VALUES ($1, $2, $3)
             RETURNING id, listing_id, bidder_id, amount, placed_at",
        )
        .bind(listing_id)
        .bind(bidder_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(bid))
    }

    async fn finalize_listing(&self, listing_id: i64) -> Result<Option<Listing>, EngineError> {
        let mut tx = self.pool.begin().await?;

        // Same lock as bid placement: once held, every accepted bid is
        // committed and no further bid can land before the close commits.
        let active: Option<bool> =
            sqlx::query_scalar("SELECT active FROM listings WHERE id = $1 FOR UPDATE")
                .bind(listing_id)
                .fetch_optional(&mut *tx)
                .await?;
        if active != Some(true) {
            tx.rollback().await?;
            return Ok(None);
        }

        let listing = sqlx::query_as::<_, Listing>(
            "UPDATE listings
             SET active = FALSE,
                 winner_id = (
                     SELECT bidder_id FROM bids
                     WHERE listing_id = listings.id
                     ORDER BY amount DESC, placed_at ASC
                     LIMIT 1
                 )
             WHERE id = $1
             RETURNING id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at",
        )
        .bind(listing_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(listing))
    }

    async fn toggle_watchlist(
        &self,
        watcher_id: i64,
        listing_id: i64,
    ) -> Result<WatchToggle, EngineError> {
        let removed = sqlx::query("DELETE FROM watchlist WHERE watcher_id = $1 AND listing_id = $2")
            .bind(watcher_id)
            .bind(listing_id)
            .execute(&*self.pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(WatchToggle::Removed);
        }

        sqlx::query(
            "INSERT INTO watchlist (watcher_id, listing_id) VALUES ($1, $2)
             ON CONFLICT (watcher_id, listing_id) DO NOTHING",
        )
        .bind(watcher_id)
        .bind(listing_id)
        .execute(&*self.pool)
        .await?;

        Ok(WatchToggle::Added)
    }

    async fn insert_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, EngineError> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (listing_id, author_id, text)
             VALUES ($1, $2, $3)
             RETURNING id, listing_id, author_id, text, created_at",
        )
        .bind(listing_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(&*self.pool)
        .await?;

        Ok(comment)
    }

    async fn insert_user(&self, username: &str, email: &str) -> Result<User, EngineError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email)
             VALUES ($1, $2)
             RETURNING id, username, email, created_at",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => EngineError::UserExists,
            _ => EngineError::from(e),
        })?;

        Ok(user)
    }
}

// endregion: --- Postgres Store
