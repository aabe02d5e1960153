//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::debug;

use crate::error::{Result, SyncError};
use crate::feed::{FEED_URL, HEADER_ROW};
use crate::ozon::OzonApi;
use crate::yandex_market::{Campaign, YandexMarketApi};

/// Marketplaces a run pushes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Ozon,
    YandexMarket,
    All,
}

impl Target {
    pub fn includes_ozon(self) -> bool {
        matches!(self, Target::Ozon | Target::All)
    }

    pub fn includes_yandex_market(self) -> bool {
        matches!(self, Target::YandexMarket | Target::All)
    }
}

/// Push distributor stock and prices to Ozon and Yandex Market
#[derive(Parser, Debug)]
#[command(name = "watch_stock_sync")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Marketplaces to update
    #[arg(long, value_enum, env = "SYNC_TARGET", default_value_t = Target::All)]
    pub target: Target,

    /// URL of the distributor's zipped stock spreadsheet
    #[arg(long, env = "FEED_URL", default_value = FEED_URL)]
    pub feed_url: String,

    /// Read the feed from a local .zip, spreadsheet or .csv file instead of downloading
    #[arg(long, env = "FEED_FILE")]
    pub feed_file: Option<PathBuf>,

    /// 0-based row holding the feed column names
    #[arg(long, env = "FEED_HEADER_ROW", default_value_t = HEADER_ROW)]
    pub header_row: usize,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Reconcile and report without uploading anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Log debug output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Ozon seller client id
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// Ozon seller API key
    #[arg(long, env = "SELLER_TOKEN", hide_env_values = true)]
    pub seller_token: Option<String>,

    /// Yandex Market partner API token
    #[arg(long, env = "MARKET_TOKEN", hide_env_values = true)]
    pub market_token: Option<String>,

    /// Yandex Market FBS campaign id
    #[arg(long, env = "FBS_ID")]
    pub fbs_id: Option<String>,

    /// Yandex Market DBS campaign id
    #[arg(long, env = "DBS_ID")]
    pub dbs_id: Option<String>,

    /// Warehouse of the FBS campaign
    #[arg(long, env = "WAREHOUSE_FBS_ID")]
    pub warehouse_fbs_id: Option<String>,

    /// Warehouse of the DBS campaign
    #[arg(long, env = "WAREHOUSE_DBS_ID")]
    pub warehouse_dbs_id: Option<String>,
}

fn required(value: &Option<String>, name: &'static str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(SyncError::MissingConfig(name))
}

impl Config {
    /// Shared HTTP client with the configured timeout
    pub fn http_client(&self) -> Result<reqwest::Client> {
        debug!("Building HTTP client with {}s timeout", self.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(concat!("watch_stock_sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }

    /// Ozon client from `CLIENT_ID` and `SELLER_TOKEN`
    pub fn ozon_api(&self, client: reqwest::Client) -> Result<OzonApi> {
        let client_id = required(&self.client_id, "CLIENT_ID")?;
        let api_key = required(&self.seller_token, "SELLER_TOKEN")?;
        Ok(OzonApi::new(client, client_id, api_key))
    }

    /// Yandex Market client from `MARKET_TOKEN`
    pub fn yandex_market_api(&self, client: reqwest::Client) -> Result<YandexMarketApi> {
        let token = required(&self.market_token, "MARKET_TOKEN")?;
        Ok(YandexMarketApi::new(client, token))
    }

    /// Configured Yandex Market campaigns, FBS first.
    ///
    /// A campaign is included when its id is set and then requires its
    /// warehouse. At least one campaign must be configured.
    pub fn campaigns(&self) -> Result<Vec<Campaign>> {
        let mut campaigns = Vec::new();

        if let Ok(campaign_id) = required(&self.fbs_id, "FBS_ID") {
            campaigns.push(Campaign {
                name: "FBS".to_string(),
                campaign_id,
                warehouse_id: required(&self.warehouse_fbs_id, "WAREHOUSE_FBS_ID")?,
            });
        }
        if let Ok(campaign_id) = required(&self.dbs_id, "DBS_ID") {
            campaigns.push(Campaign {
                name: "DBS".to_string(),
                campaign_id,
                warehouse_id: required(&self.warehouse_dbs_id, "WAREHOUSE_DBS_ID")?,
            });
        }

        if campaigns.is_empty() {
            return Err(SyncError::MissingConfig("FBS_ID"));
        }
        Ok(campaigns)
    }
}
