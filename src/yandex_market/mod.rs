//! Yandex Market Partner API client for offer listing and stock/price updates.
//!
//! Every call is scoped to a campaign (FBS or DBS storefront) and
//! authenticated with a bearer token.

mod models;
mod offers;
mod updates;

use log::{debug, error};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SyncError};

pub use models::{
    OfferMappingPage, YandexPrice, YandexPriceValue, YandexStock, YandexStockItem,
};

/// Production API root
pub const BASE_URL: &str = "https://api.partner.market.yandex.ru";
/// Offer mappings per listing page
pub const PAGE_LIMIT: u32 = 200;
/// Stock entries per update call
pub const STOCK_BATCH_SIZE: usize = 2000;
/// Price entries per update call
pub const PRICE_BATCH_SIZE: usize = 500;
/// Currency id for price updates
pub const CURRENCY: &str = "RUR";

/// A storefront and the warehouse its stock is reported for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    /// Short label for logs, e.g. "FBS"
    pub name: String,
    pub campaign_id: String,
    pub warehouse_id: String,
}

/// Yandex Market Partner API client.
pub struct YandexMarketApi {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl YandexMarketApi {
    /// Creates a client for the given OAuth token.
    pub fn new(client: Client, token: String) -> Self {
        log::info!("Creating Yandex Market Partner API client");
        debug!("API token length: {}", token.len());
        Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends an authenticated request and decodes the JSON response body.
    pub(crate) async fn send_json<Q, B, R>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<R>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json");
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{method} {path} failed with status {status}: {body}");
            return Err(SyncError::Api { status, body });
        }

        let response_text = response.text().await?;
        debug!("Response body: {response_text}");
        Ok(serde_json::from_str(&response_text)?)
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
