/// Bid placement and price computation.
// region:    --- Imports
use crate::auction::model::Bid;
use crate::error::EngineError;
use crate::store::AuctionStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands

/// Place-bid command
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: Decimal,
}

// Bound on re-validation rounds when concurrent bids keep invalidating the
// observed maximum.
const MAX_RETRIES: i32 = 100;

/// Accept a bid if it clears the floor and strictly exceeds the current
/// maximum. Validation and insertion are one atomic unit: the store append is
/// conditional on the maximum observed here, and a stale observation triggers
/// a re-read rather than accepting an outbid amount.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    store: &impl AuctionStore,
) -> Result<Bid, EngineError> {
    info!("{:<12} --> place bid: {:?}", "Command", cmd);
    let mut retries = 0;

    while retries < MAX_RETRIES {
        let listing = store.listing(cmd.listing_id).await?;

        if !listing.active {
            return Err(EngineError::ClosedAuction);
        }

        let observed_max = store.highest_bid(cmd.listing_id).await?.map(|b| b.amount);

        // The first bid may equal the starting bid; every later bid must
        // strictly exceed the running maximum.
        match observed_max {
            None if cmd.amount < listing.starting_bid => {
                return Err(EngineError::BidTooLow {
                    amount: cmd.amount,
                    minimum: listing.starting_bid,
                });
            }
            Some(max) if cmd.amount <= max => {
                return Err(EngineError::BidTooLow {
                    amount: cmd.amount,
                    minimum: max,
                });
            }
            _ => {}
        }

        match store
            .append_bid(cmd.listing_id, cmd.bidder_id, cmd.amount, observed_max)
            .await?
        {
            Some(bid) => {
                info!(
                    "{:<12} --> bid accepted: listing {} now at {}",
                    "Command", bid.listing_id, bid.amount
                );
                return Ok(bid);
            }
            None => {
                warn!(
                    "{:<12} --> stale maximum on listing {}: retrying",
                    "Command", cmd.listing_id
                );
                retries += 1;
                continue;
            }
        }
    }

    Err(EngineError::RetriesExhausted)
}

/// Displayed price of a listing: the maximum bid amount, or the starting bid
/// while no bids exist.
pub async fn current_price(
    listing_id: i64,
    store: &impl AuctionStore,
) -> Result<Decimal, EngineError> {
    let listing = store.listing(listing_id).await?;
    let highest = store.highest_bid(listing_id).await?;
    Ok(highest.map_or(listing.starting_bid, |b| b.amount))
}

// endregion: --- Commands
