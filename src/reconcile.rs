//! Reconciliation of feed records against marketplace offers
//!
//! Produces marketplace-neutral stock and price updates. Each marketplace
//! client converts them into its own wire format.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use log::{debug, info};

use crate::error::{Result, SyncError};
use crate::feed::FeedRecord;

/// New stock level for one offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub offer_id: String,
    pub quantity: u32,
    pub warehouse_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl StockUpdate {
    /// Timestamp in the `YYYY-MM-DDTHH:MM:SSZ` form the marketplaces expect
    pub fn updated_at(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// New price for one offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    pub offer_id: String,
    /// Whole currency units, digits only
    pub price: String,
    pub currency: String,
}

/// Current UTC time truncated to whole seconds
pub fn update_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Builds stock updates for every known offer.
///
/// Offers found in the feed get the quantity from their indicator, in feed
/// order; a code repeated in the feed only counts once. Known offers the feed
/// does not mention follow with quantity zero, in `known_offer_ids` order.
pub fn reconcile_stocks(
    records: &[FeedRecord],
    known_offer_ids: &[String],
    warehouse_id: Option<&str>,
    timestamp: DateTime<Utc>,
) -> Result<Vec<StockUpdate>> {
    let mut remaining: HashSet<&str> = known_offer_ids.iter().map(String::as_str).collect();
    let mut stocks = Vec::with_capacity(remaining.len());

    let update = |offer_id: &str, quantity: u32| StockUpdate {
        offer_id: offer_id.to_string(),
        quantity,
        warehouse_id: warehouse_id.map(str::to_string),
        timestamp,
    };

    for record in records {
        if !remaining.remove(record.code.as_str()) {
            continue;
        }
        let quantity = record.stock_quantity()?;
        debug!(
            "Offer {}: indicator '{}' -> {}",
            record.code, record.quantity_indicator, quantity
        );
        stocks.push(update(&record.code, quantity));
    }
    let matched = stocks.len();

    for offer_id in known_offer_ids {
        if remaining.remove(offer_id.as_str()) {
            stocks.push(update(offer_id, 0));
        }
    }

    info!(
        "Reconciled {} stock updates ({} from feed, {} zero-filled)",
        stocks.len(),
        matched,
        stocks.len() - matched
    );
    Ok(stocks)
}

/// Builds price updates for known offers present in the feed.
///
/// Offers missing from the feed get no price update. Fails with
/// [`SyncError::InvalidPrice`] when a matched price has no digits.
pub fn reconcile_prices(
    records: &[FeedRecord],
    known_offer_ids: &[String],
    currency: &str,
) -> Result<Vec<PriceUpdate>> {
    let known: HashSet<&str> = known_offer_ids.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut prices = Vec::new();

    for record in records {
        let code = record.code.as_str();
        if !known.contains(code) || !seen.insert(code) {
            continue;
        }
        let price = record.normalized_price();
        if price.is_empty() {
            return Err(SyncError::InvalidPrice {
                code: record.code.clone(),
                value: record.price_text.clone(),
            });
        }
        prices.push(PriceUpdate {
            offer_id: record.code.clone(),
            price,
            currency: currency.to_string(),
        });
    }

    info!(
        "Reconciled {} price updates for {} known offers",
        prices.len(),
        known.len()
    );
    Ok(prices)
}

/// Stock updates with something to sell
pub fn in_stock(stocks: &[StockUpdate]) -> Vec<&StockUpdate> {
    stocks.iter().filter(|stock| stock.quantity > 0).collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
