//! Per-marketplace sync runs: enumerate offers, reconcile, upload.

use std::fmt;

use log::info;

use crate::error::Result;
use crate::feed::FeedRecord;
use crate::ozon::{self, OzonApi};
use crate::reconcile::{in_stock, reconcile_prices, reconcile_stocks, update_timestamp};
use crate::yandex_market::{self, Campaign, YandexMarketApi};

/// Outcome of one marketplace/campaign run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub marketplace: &'static str,
    pub campaign: Option<String>,
    /// Offers known to the marketplace
    pub offers: usize,
    /// Stock updates built (and sent, unless dry run)
    pub stocks_sent: usize,
    /// Stock updates with quantity above zero
    pub in_stock: usize,
    /// Price updates built (and sent, unless dry run)
    pub prices_sent: usize,
    /// Upload calls made
    pub batches: usize,
    pub dry_run: bool,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marketplace)?;
        if let Some(campaign) = &self.campaign {
            write!(f, " [{campaign}]")?;
        }
        write!(
            f,
            ": {} offers, {} stock updates ({} in stock), {} price updates, {} upload calls",
            self.offers, self.stocks_sent, self.in_stock, self.prices_sent, self.batches
        )?;
        if self.dry_run {
            write!(f, " (dry run)")?;
        }
        Ok(())
    }
}

/// Sync stock and prices to the Ozon seller account
pub async fn sync_ozon(api: &OzonApi, records: &[FeedRecord], dry_run: bool) -> Result<SyncReport> {
    info!("Syncing Ozon");
    let offer_ids = api.offer_ids().await?;

    let stocks = reconcile_stocks(records, &offer_ids, None, update_timestamp())?;
    let mut batches = 0;
    if dry_run {
        info!("Dry run: skipping Ozon stock upload");
    } else {
        batches += api.upload_stocks(&stocks).await?;
    }

    // Stock is already sent when a bad price row fails this step.
    let prices = reconcile_prices(records, &offer_ids, ozon::CURRENCY)?;
    if dry_run {
        info!("Dry run: skipping Ozon price upload");
    } else {
        batches += api.upload_prices(&prices).await?;
    }

    Ok(SyncReport {
        marketplace: "Ozon",
        campaign: None,
        offers: offer_ids.len(),
        stocks_sent: stocks.len(),
        in_stock: in_stock(&stocks).len(),
        prices_sent: prices.len(),
        batches,
        dry_run,
    })
}

/// Sync stock and prices to one Yandex Market campaign
pub async fn sync_yandex_market(
    api: &YandexMarketApi,
    campaign: &Campaign,
    records: &[FeedRecord],
    dry_run: bool,
) -> Result<SyncReport> {
    info!(
        "Syncing Yandex Market {} campaign {}",
        campaign.name, campaign.campaign_id
    );
    let offer_ids = api.offer_ids(&campaign.campaign_id).await?;

    let stocks = reconcile_stocks(
        records,
        &offer_ids,
        Some(&campaign.warehouse_id),
        update_timestamp(),
    )?;
    let mut batches = 0;
    if dry_run {
        info!("Dry run: skipping Yandex Market stock upload");
    } else {
        batches += api.upload_stocks(&campaign.campaign_id, &stocks).await?;
    }

    let prices = reconcile_prices(records, &offer_ids, yandex_market::CURRENCY)?;
    if dry_run {
        info!("Dry run: skipping Yandex Market price upload");
    } else {
        batches += api.upload_prices(&campaign.campaign_id, &prices).await?;
    }

    Ok(SyncReport {
        marketplace: "Yandex Market",
        campaign: Some(campaign.name.clone()),
        offers: offer_ids.len(),
        stocks_sent: stocks.len(),
        in_stock: in_stock(&stocks).len(),
        prices_sent: prices.len(),
        batches,
        dry_run,
    })
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
