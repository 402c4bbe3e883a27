/// Listing lookup
pub const GET_LISTING: &str = "SELECT id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at FROM listings WHERE id = $1";

/// Active listings, newest first
pub const GET_ACTIVE_LISTINGS: &str =
    "SELECT id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at FROM listings WHERE active ORDER BY created_at DESC";

/// Active listings in one category, newest first
pub const GET_ACTIVE_LISTINGS_BY_CATEGORY: &str =
    "SELECT id, title, description, starting_bid, img_url, category, active, creator_id, winner_id, created_at FROM listings WHERE active AND category = $1 ORDER BY created_at DESC";

/// Displayed price: maximum bid, falling back to the starting bid
pub const GET_CURRENT_PRICE: &str = r#"
    SELECT COALESCE(
        (SELECT MAX(amount) FROM bids WHERE listing_id = l.id),
        l.starting_bid
    ) AS current_price
    FROM listings l
    WHERE l.id = $1
"#;

/// Bid history, newest first
pub const GET_BID_HISTORY: &str = r#"
    SELECT id, listing_id, bidder_id, amount, placed_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY placed_at DESC
"#;

/// Listings on a user's watchlist
pub const GET_WATCHLIST: &str = r#"
    SELECT l.id, l.title, l.description, l.starting_bid, l.img_url, l.category,
           l.active, l.creator_id, l.winner_id, l.created_at
    FROM listings l
    JOIN watchlist w ON w.listing_id = l.id
    WHERE w.watcher_id = $1
    ORDER BY l.created_at DESC
"#;

/// Explicit watch-membership check
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE watcher_id = $1 AND listing_id = $2) AS watching";

/// Comments on a listing, oldest first
pub const GET_COMMENTS: &str = r#"
    SELECT id, listing_id, author_id, text, created_at
    FROM comments
    WHERE listing_id = $1
    ORDER BY created_at ASC
"#;
