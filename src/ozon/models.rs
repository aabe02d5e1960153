//! Ozon request and response payloads.

use serde::{Deserialize, Serialize};

use crate::reconcile::{PriceUpdate, StockUpdate};

/// `{"result": ...}` wrapper used by every Ozon response
#[derive(Debug, Deserialize)]
pub(crate) struct ResultEnvelope<T> {
    pub result: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductFilter {
    pub visibility: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductListRequest<'a> {
    pub filter: ProductFilter,
    pub last_id: &'a str,
    pub limit: u32,
}

/// One page of `/v2/product/list`
#[derive(Debug, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub items: Vec<ProductItem>,
    /// Number of products across all pages
    #[serde(default)]
    pub total: usize,
    /// Cursor for the next page
    #[serde(default)]
    pub last_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductItem {
    pub offer_id: String,
    #[serde(default)]
    pub product_id: Option<u64>,
}

/// Price entry of `/v1/product/import/prices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OzonPrice {
    pub auto_action_enabled: String,
    pub currency_code: String,
    pub offer_id: String,
    pub old_price: String,
    pub price: String,
}

impl From<&PriceUpdate> for OzonPrice {
    fn from(update: &PriceUpdate) -> Self {
        Self {
            auto_action_enabled: "UNKNOWN".to_string(),
            currency_code: update.currency.clone(),
            offer_id: update.offer_id.clone(),
            old_price: "0".to_string(),
            price: update.price.clone(),
        }
    }
}

/// Stock entry of `/v1/product/import/stocks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OzonStock {
    pub offer_id: String,
    pub stock: u32,
}

impl From<&StockUpdate> for OzonStock {
    fn from(update: &StockUpdate) -> Self {
        Self {
            offer_id: update.offer_id.clone(),
            stock: update.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PricesRequest<'a> {
    pub prices: &'a [OzonPrice],
}

#[derive(Debug, Serialize)]
pub(crate) struct StocksRequest<'a> {
    pub stocks: &'a [OzonStock],
}

/// Per-offer outcome of an import call
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub offer_id: String,
    #[serde(default)]
    pub updated: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}
