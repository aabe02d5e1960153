//! Stock and price imports.

use log::{info, warn};

use crate::batch::upload_in_batches;
use crate::error::Result;
use crate::reconcile::{PriceUpdate, StockUpdate};

use super::models::{
    ImportResult, OzonPrice, OzonStock, PricesRequest, ResultEnvelope, StocksRequest,
};
use super::{OzonApi, PRICE_BATCH_SIZE, STOCK_BATCH_SIZE};

impl OzonApi {
    /// Sends one price import call.
    pub async fn update_prices(&self, prices: &[OzonPrice]) -> Result<Vec<ImportResult>> {
        let envelope: ResultEnvelope<Vec<ImportResult>> = self
            .post_json("/v1/product/import/prices", &PricesRequest { prices })
            .await?;
        log_rejected("price", &envelope.result);
        Ok(envelope.result)
    }

    /// Sends one stock import call.
    pub async fn update_stocks(&self, stocks: &[OzonStock]) -> Result<Vec<ImportResult>> {
        let envelope: ResultEnvelope<Vec<ImportResult>> = self
            .post_json("/v1/product/import/stocks", &StocksRequest { stocks })
            .await?;
        log_rejected("stock", &envelope.result);
        Ok(envelope.result)
    }

    /// Uploads all price updates in batches of [`PRICE_BATCH_SIZE`]. Returns the call count.
    pub async fn upload_prices(&self, prices: &[PriceUpdate]) -> Result<usize> {
        let payload: Vec<OzonPrice> = prices.iter().map(OzonPrice::from).collect();
        info!("Uploading {} prices to Ozon", payload.len());

        upload_in_batches(&payload, PRICE_BATCH_SIZE, |batch| async move {
            self.update_prices(batch).await.map(|_| ())
        })
        .await
    }

    /// Uploads all stock updates in batches of [`STOCK_BATCH_SIZE`]. Returns the call count.
    pub async fn upload_stocks(&self, stocks: &[StockUpdate]) -> Result<usize> {
        let payload: Vec<OzonStock> = stocks.iter().map(OzonStock::from).collect();
        info!("Uploading {} stock levels to Ozon", payload.len());

        upload_in_batches(&payload, STOCK_BATCH_SIZE, |batch| async move {
            self.update_stocks(batch).await.map(|_| ())
        })
        .await
    }
}

fn log_rejected(kind: &str, results: &[ImportResult]) {
    for result in results.iter().filter(|r| !r.updated) {
        warn!(
            "Ozon rejected {kind} for offer {}: {:?}",
            result.offer_id, result.errors
        );
    }
}
