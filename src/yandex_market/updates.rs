//! Stock and price updates for a campaign.

use log::{info, warn};
use reqwest::Method;

use crate::batch::upload_in_batches;
use crate::error::Result;
use crate::reconcile::{PriceUpdate, StockUpdate};

use super::models::{PricesRequest, StatusResponse, StocksRequest, YandexPrice, YandexStock};
use super::{YandexMarketApi, PRICE_BATCH_SIZE, STOCK_BATCH_SIZE};

impl YandexMarketApi {
    /// Sends one stock update call.
    pub async fn update_stocks(&self, campaign_id: &str, stocks: &[YandexStock]) -> Result<()> {
        let path = format!("/campaigns/{campaign_id}/offers/stocks");
        let response: StatusResponse = self
            .send_json(Method::PUT, &path, None::<&()>, Some(&StocksRequest { skus: stocks }))
            .await?;
        check_status("stock", &response);
        Ok(())
    }

    /// Sends one price update call.
    pub async fn update_prices(&self, campaign_id: &str, prices: &[YandexPrice]) -> Result<()> {
        let path = format!("/campaigns/{campaign_id}/offer-prices/updates");
        let response: StatusResponse = self
            .send_json(Method::POST, &path, None::<&()>, Some(&PricesRequest { offers: prices }))
            .await?;
        check_status("price", &response);
        Ok(())
    }

    /// Uploads all stock updates in batches of [`STOCK_BATCH_SIZE`]. Returns the call count.
    pub async fn upload_stocks(&self, campaign_id: &str, stocks: &[StockUpdate]) -> Result<usize> {
        let payload: Vec<YandexStock> = stocks.iter().map(YandexStock::from).collect();
        info!(
            "Uploading {} stock levels to campaign {campaign_id}",
            payload.len()
        );

        upload_in_batches(&payload, STOCK_BATCH_SIZE, |batch| {
            self.update_stocks(campaign_id, batch)
        })
        .await
    }

    /// Uploads all price updates in batches of [`PRICE_BATCH_SIZE`]. Returns the call count.
    pub async fn upload_prices(&self, campaign_id: &str, prices: &[PriceUpdate]) -> Result<usize> {
        let payload = prices
            .iter()
            .map(YandexPrice::try_from)
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Uploading {} prices to campaign {campaign_id}",
            payload.len()
        );

        upload_in_batches(&payload, PRICE_BATCH_SIZE, |batch| {
            self.update_prices(campaign_id, batch)
        })
        .await
    }
}

fn check_status(kind: &str, response: &StatusResponse) {
    if response.status != "OK" {
        warn!(
            "Yandex Market answered {kind} update with status '{}'",
            response.status
        );
    }
}
