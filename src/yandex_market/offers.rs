//! Offer enumeration over `offer-mapping-entries`.

use std::collections::HashSet;

use log::{debug, info, warn};
use reqwest::Method;

use crate::error::Result;

use super::models::{OfferMappingPage, PageQuery, ResultEnvelope};
use super::{YandexMarketApi, PAGE_LIMIT};

impl YandexMarketApi {
    /// Fetches one page of offer mappings; `None` requests the first page.
    pub async fn list_offer_mappings(
        &self,
        campaign_id: &str,
        page_token: Option<&str>,
    ) -> Result<OfferMappingPage> {
        let path = format!("/campaigns/{campaign_id}/offer-mapping-entries");
        let query = PageQuery {
            page_token,
            limit: PAGE_LIMIT,
        };
        let envelope: ResultEnvelope<OfferMappingPage> = self
            .send_json(Method::GET, &path, Some(&query), None::<&()>)
            .await?;
        Ok(envelope.result)
    }

    /// Collects the shop SKUs of every offer in the campaign.
    ///
    /// Pages until the API stops returning a next page token. A repeated
    /// token or an empty page also ends the listing.
    pub async fn offer_ids(&self, campaign_id: &str) -> Result<Vec<String>> {
        info!("Enumerating Yandex Market offers for campaign {campaign_id}");

        let mut page_token: Option<String> = None;
        let mut pages = 0;
        let mut seen = HashSet::new();
        let mut offer_ids = Vec::new();

        loop {
            let page = self
                .list_offer_mappings(campaign_id, page_token.as_deref())
                .await?;
            pages += 1;

            let count = page.offer_mapping_entries.len();
            debug!("Page {pages}: {count} offer mappings");

            let next = page.next_page_token().map(str::to_string);
            for entry in page.offer_mapping_entries {
                if seen.insert(entry.offer.shop_sku.clone()) {
                    offer_ids.push(entry.offer.shop_sku);
                }
            }

            let Some(next) = next else {
                break;
            };
            if count == 0 || page_token.as_deref() == Some(next.as_str()) {
                warn!("Offer listing for campaign {campaign_id} stalled at page {pages}, stopping");
                break;
            }
            page_token = Some(next);
        }

        info!(
            "Found {} offers in campaign {campaign_id} in {pages} page(s)",
            offer_ids.len()
        );
        Ok(offer_ids)
    }
}
