use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Listing model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub img_url: Option<String>,
    pub category: Option<String>,
    pub active: bool,
    pub creator_id: i64,
    pub winner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to persist a new listing. Everything else (active flag,
/// winner, timestamps) is set by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub starting_bid: Decimal,
    pub img_url: Option<String>,
    pub category: Option<String>,
    pub creator_id: i64,
}

// Bid model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: Decimal,
    pub placed_at: DateTime<Utc>,
}

// Comment model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// User model (registration surface only)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a watchlist toggle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WatchToggle {
    Added,
    Removed,
}
