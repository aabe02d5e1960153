//! Yandex Market request and response payloads.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};
use crate::reconcile::{PriceUpdate, StockUpdate};

/// `{"status": ..., "result": ...}` wrapper of listing responses
#[derive(Debug, Deserialize)]
pub(crate) struct ResultEnvelope<T> {
    pub result: T,
}

/// Response of update calls
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
    pub limit: u32,
}

/// One page of `offer-mapping-entries`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferMappingPage {
    #[serde(default)]
    pub offer_mapping_entries: Vec<OfferMappingEntry>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl OfferMappingPage {
    /// Cursor of the next page, if the API announced one
    pub fn next_page_token(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.next_page_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OfferMappingEntry {
    pub offer: MappedOffer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedOffer {
    pub shop_sku: String,
}

/// Stock entry of `offers/stocks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexStock {
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<String>,
    pub items: Vec<YandexStockItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexStockItem {
    pub count: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub updated_at: String,
}

impl From<&StockUpdate> for YandexStock {
    fn from(update: &StockUpdate) -> Self {
        Self {
            sku: update.offer_id.clone(),
            warehouse_id: update.warehouse_id.clone(),
            items: vec![YandexStockItem {
                count: update.quantity,
                kind: "FIT".to_string(),
                updated_at: update.updated_at(),
            }],
        }
    }
}

/// Price entry of `offer-prices/updates`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YandexPrice {
    pub id: String,
    pub price: YandexPriceValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexPriceValue {
    pub value: u64,
    pub currency_id: String,
}

impl TryFrom<&PriceUpdate> for YandexPrice {
    type Error = SyncError;

    fn try_from(update: &PriceUpdate) -> Result<Self> {
        let value = update
            .price
            .parse::<u64>()
            .map_err(|_| SyncError::InvalidPrice {
                code: update.offer_id.clone(),
                value: update.price.clone(),
            })?;
        Ok(Self {
            id: update.offer_id.clone(),
            price: YandexPriceValue {
                value,
                currency_id: update.currency.clone(),
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StocksRequest<'a> {
    pub skus: &'a [YandexStock],
}

#[derive(Debug, Serialize)]
pub(crate) struct PricesRequest<'a> {
    pub offers: &'a [YandexPrice],
}
