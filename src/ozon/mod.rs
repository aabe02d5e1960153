//! Ozon Seller API client for offer listing and stock/price imports.
//!
//! Requests are authenticated with the `Client-Id` and `Api-Key` headers.

mod models;
mod products;
mod updates;

use log::{debug, error};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SyncError};

pub use models::{ImportResult, OzonPrice, OzonStock, ProductItem, ProductList};

/// Production API root
pub const BASE_URL: &str = "https://api-seller.ozon.ru";
/// Products per listing page
pub const PAGE_LIMIT: u32 = 1000;
/// Stock entries per import call
pub const STOCK_BATCH_SIZE: usize = 100;
/// Price entries per import call
pub const PRICE_BATCH_SIZE: usize = 900;
/// Currency code for price imports
pub const CURRENCY: &str = "RUB";

/// Ozon Seller API client.
pub struct OzonApi {
    pub(crate) client: Client,
    pub(crate) client_id: String,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl OzonApi {
    /// Creates a client for the given seller credentials.
    pub fn new(client: Client, client_id: String, api_key: String) -> Self {
        log::info!("Creating Ozon Seller API client for client id {client_id}");
        debug!("API key length: {}", api_key.len());
        Self {
            client,
            client_id,
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends an authenticated JSON POST and decodes the response body.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("POST {path} failed with status {status}: {body}");
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
