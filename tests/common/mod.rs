/// In-memory `AuctionStore` used to drive the command layer without a
/// database. The mutex makes each store operation atomic, matching the
/// isolation the Postgres implementation gets from conditional statements.
use async_trait::async_trait;
use auction_engine::auction::model::{
    Bid, Comment, Listing, NewListing, User, WatchToggle,
};
use auction_engine::error::EngineError;
use auction_engine::store::AuctionStore;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    listings: HashMap<i64, Listing>,
    bids: HashMap<i64, Vec<Bid>>,
    watchlist: HashSet<(i64, i64)>,
    comments: Vec<Comment>,
    users: Vec<User>,
    last_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn current_max(&self, listing_id: i64) -> Option<Decimal> {
        self.bids
            .get(&listing_id)
            .and_then(|bids| bids.iter().map(|b| b.amount).max())
    }

    // Highest amount wins; equal amounts go to the earliest bid.
    fn winning_bidder(&self, listing_id: i64) -> Option<i64> {
        self.bids.get(&listing_id).and_then(|bids| {
            bids.iter()
                .fold(None::<&Bid>, |best, bid| match best {
                    Some(cur) if bid.amount <= cur.amount => Some(cur),
                    _ => Some(bid),
                })
                .map(|b| b.bidder_id)
        })
    }
}

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn insert_listing(&self, new: NewListing) -> Result<Listing, EngineError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let listing = Listing {
            id,
            title: new.title,
            description: new.description,
            starting_bid: new.starting_bid,
            img_url: new.img_url,
            category: new.category,
            active: true,
            creator_id: new.creator_id,
            winner_id: None,
            created_at: Utc::now(),
        };
        inner.listings.insert(id, listing.clone());
        Ok(listing)
    }

    async fn listing(&self, listing_id: i64) -> Result<Listing, EngineError> {
        let inner = self.inner.lock().await;
        inner
            .listings
            .get(&listing_id)
            .cloned()
            .ok_or(EngineError::NotFound)
    }

    async fn highest_bid(&self, listing_id: i64) -> Result<Option<Bid>, EngineError> {
        let inner = self.inner.lock().await;
        let highest = inner.bids.get(&listing_id).and_then(|bids| {
            bids.iter()
                .fold(None::<&Bid>, |best, bid| match best {
                    Some(cur) if bid.amount <= cur.amount => Some(cur),
                    _ => Some(bid),
                })
                .cloned()
        });
        Ok(highest)
    }

    async fn append_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
        observed_max: Option<Decimal>,
    ) -> Result<Option<Bid>, EngineError> {
        let mut inner = self.inner.lock().await;

        let active = inner
            .listings
            .get(&listing_id)
            .is_some_and(|l| l.active);
        if !active {
            return Ok(None);
        }
        if inner.current_max(listing_id) != observed_max {
            return Ok(None);
        }

        let id = inner.next_id();
        let bid = Bid {
            id,
            listing_id,
            bidder_id,
            amount,
            placed_at: Utc::now(),
        };
        inner.bids.entry(listing_id).or_default().push(bid.clone());
        Ok(Some(bid))
    }

    async fn finalize_listing(&self, listing_id: i64) -> Result<Option<Listing>, EngineError> {
        let mut inner = self.inner.lock().await;
        let winner = inner.winning_bidder(listing_id);

        let Some(listing) = inner.listings.get_mut(&listing_id) else {
            return Ok(None);
        };
        if !listing.active {
            return Ok(None);
        }
        listing.active = false;
        listing.winner_id = winner;
        Ok(Some(listing.clone()))
    }

    async fn toggle_watchlist(
        &self,
        watcher_id: i64,
        listing_id: i64,
    ) -> Result<WatchToggle, EngineError> {
        let mut inner = self.inner.lock().await;
        if inner.watchlist.remove(&(watcher_id, listing_id)) {
            Ok(WatchToggle::Removed)
        } else {
            inner.watchlist.insert((watcher_id, listing_id));
            Ok(WatchToggle::Added)
        }
    }

    async fn insert_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, EngineError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let comment = Comment {
            id,
            listing_id,
            author_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn insert_user(&self, username: &str, email: &str) -> Result<User, EngineError> {
        let mut inner = self.inner.lock().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(EngineError::UserExists);
        }
        let id = inner.next_id();
        let user = User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }
}

impl MemoryStore {
    /// All bid amounts on a listing in placement order.
    pub async fn bid_amounts(&self, listing_id: i64) -> Vec<Decimal> {
        let inner = self.inner.lock().await;
        inner
            .bids
            .get(&listing_id)
            .map(|bids| bids.iter().map(|b| b.amount).collect())
            .unwrap_or_default()
    }
}
