//! Offer enumeration over `/v2/product/list`.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::error::Result;

use super::models::{ProductFilter, ProductList, ProductListRequest, ResultEnvelope};
use super::{OzonApi, PAGE_LIMIT};

impl OzonApi {
    /// Fetches one page of the product list, starting after `last_id`.
    pub async fn list_products(&self, last_id: &str) -> Result<ProductList> {
        let request = ProductListRequest {
            filter: ProductFilter { visibility: "ALL" },
            last_id,
            limit: PAGE_LIMIT,
        };
        let envelope: ResultEnvelope<ProductList> =
            self.post_json("/v2/product/list", &request).await?;
        Ok(envelope.result)
    }

    /// Collects the offer ids of every product in the seller account.
    ///
    /// Pages until the number of fetched items reaches the advertised total.
    /// An empty page or an empty cursor also ends the listing.
    pub async fn offer_ids(&self) -> Result<Vec<String>> {
        info!("Enumerating Ozon offers");

        let mut last_id = String::new();
        let mut fetched = 0;
        let mut pages = 0;
        let mut seen = HashSet::new();
        let mut offer_ids = Vec::new();

        loop {
            let page = self.list_products(&last_id).await?;
            pages += 1;

            let count = page.items.len();
            fetched += count;
            debug!(
                "Page {pages}: {count} items ({fetched}/{} fetched)",
                page.total
            );

            for item in page.items {
                if seen.insert(item.offer_id.clone()) {
                    offer_ids.push(item.offer_id);
                }
            }

            if fetched >= page.total {
                break;
            }
            if count == 0 || page.last_id.is_empty() {
                warn!(
                    "Product list ended after {fetched} of {} advertised items",
                    page.total
                );
                break;
            }
            last_id = page.last_id;
        }

        info!("Found {} Ozon offers in {pages} page(s)", offer_ids.len());
        Ok(offer_ids)
    }
}
