//! Watch Stock Sync - distributor feed to marketplace sync
//!
//! Downloads the distributor's stock spreadsheet, reconciles it against the
//! offers listed on Ozon and Yandex Market, and pushes stock levels and
//! prices to both marketplaces in batches.

pub mod batch;
pub mod config;
pub mod error;
pub mod feed;
pub mod ozon;
pub mod reconcile;
pub mod sync;
pub mod yandex_market;

pub use config::{Config, Target};
pub use error::{ErrorCategory, Result, SyncError};
pub use feed::{FeedFetcher, FeedRecord};
pub use ozon::OzonApi;
pub use reconcile::{in_stock, reconcile_prices, reconcile_stocks, PriceUpdate, StockUpdate};
pub use sync::{sync_ozon, sync_yandex_market, SyncReport};
pub use yandex_market::{Campaign, YandexMarketApi};
