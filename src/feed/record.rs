//! Feed record and the distributor's field conventions.

use log::debug;

use crate::error::{Result, SyncError};

/// Quantity indicator the distributor uses for "more than ten"
pub const MANY_INDICATOR: &str = ">10";
/// Stock sent for [`MANY_INDICATOR`]
pub const MANY_QUANTITY: u32 = 100;
/// Quantity indicator for a last unit, which is kept off the marketplaces
pub const LAST_UNIT_INDICATOR: &str = "1";

/// One product row of the distributor's stock spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    /// Distributor product code, matched against marketplace offer ids
    pub code: String,
    /// Raw "Количество" cell
    pub quantity_indicator: String,
    /// Raw "Цена" cell, e.g. "5'990.00 руб."
    pub price_text: String,
}

impl FeedRecord {
    pub fn new(
        code: impl Into<String>,
        quantity_indicator: impl Into<String>,
        price_text: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            quantity_indicator: quantity_indicator.into(),
            price_text: price_text.into(),
        }
    }

    /// Stock level to publish for this record.
    ///
    /// Fails with [`SyncError::InvalidQuantity`] when the indicator is neither
    /// a known category nor an integer.
    pub fn stock_quantity(&self) -> Result<u32> {
        parse_quantity(&self.quantity_indicator).ok_or_else(|| SyncError::InvalidQuantity {
            code: self.code.clone(),
            value: self.quantity_indicator.clone(),
        })
    }

    /// Price digits to publish for this record, see [`normalize_price`].
    pub fn normalized_price(&self) -> String {
        normalize_price(&self.price_text)
    }
}

/// Maps a quantity indicator to a stock level.
///
/// # Examples
/// - ">10" -> 100
/// - "1" -> 0
/// - "7" -> 7
/// - "many" -> None
pub fn parse_quantity(indicator: &str) -> Option<u32> {
    let indicator = indicator.trim();
    match indicator {
        MANY_INDICATOR => Some(MANY_QUANTITY),
        LAST_UNIT_INDICATOR => Some(0),
        other => {
            let parsed = other.parse::<u32>().ok();
            if parsed.is_none() {
                debug!("Unparseable quantity indicator: '{other}'");
            }
            parsed
        }
    }
}

/// Drops everything from the first '.' on, then every non-digit character.
///
/// # Examples
/// - "5'990.00 руб." -> "5990"
/// - "1200 руб." -> "1200"
pub fn normalize_price(price_text: &str) -> String {
    let whole = price_text.split('.').next().unwrap_or_default();
    whole.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
