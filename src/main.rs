//! Watch Stock Sync
//!
//! Pushes the distributor's stock levels and prices to Ozon and to every
//! configured Yandex Market campaign. Each marketplace runs independently so
//! one failing target does not stop the others.

use clap::Parser;
use watch_stock_sync::{
    sync_ozon, sync_yandex_market, Config, ErrorCategory, FeedFetcher, FeedRecord, Result,
    SyncError, SyncReport,
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the environment may already be set
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::info!("Starting watch_stock_sync...");

    let client = match config.http_client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let records = match load_feed(&config, client.clone()).await {
        Ok(records) => {
            log::info!("Loaded {} feed rows", records.len());
            records
        }
        Err(e) => {
            report_failure("Feed", &e);
            std::process::exit(1);
        }
    };

    let mut failures = 0;

    if config.target.includes_ozon() {
        let result = match config.ozon_api(client.clone()) {
            Ok(api) => sync_ozon(&api, &records, config.dry_run).await,
            Err(e) => Err(e),
        };
        failures += log_outcome("Ozon", result);
    }

    if config.target.includes_yandex_market() {
        failures += run_yandex_market(&config, client, &records).await;
    }

    if failures > 0 {
        log::error!("Sync finished with {} failed target(s)", failures);
        std::process::exit(1);
    }
    log::info!("Sync complete");
}

/// Read the feed from `--feed-file` when given, otherwise download it
async fn load_feed(config: &Config, client: reqwest::Client) -> Result<Vec<FeedRecord>> {
    let fetcher = FeedFetcher::new(client)
        .with_url(config.feed_url.as_str())
        .with_header_row(config.header_row);

    match &config.feed_file {
        Some(path) => {
            log::info!("Reading feed from {}", path.display());
            fetcher.load_file(path)
        }
        None => fetcher.fetch().await,
    }
}

/// Sync every configured campaign. Returns the number of failed campaigns.
async fn run_yandex_market(config: &Config, client: reqwest::Client, records: &[FeedRecord]) -> usize {
    let setup = config
        .yandex_market_api(client)
        .and_then(|api| config.campaigns().map(|campaigns| (api, campaigns)));

    let (api, campaigns) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            report_failure("Yandex Market", &e);
            return 1;
        }
    };

    let mut failures = 0;
    for campaign in &campaigns {
        let target = format!("Yandex Market {}", campaign.name);
        let result = sync_yandex_market(&api, campaign, records, config.dry_run).await;
        failures += log_outcome(&target, result);
    }
    failures
}

fn log_outcome(target: &str, result: Result<SyncReport>) -> usize {
    match result {
        Ok(report) => {
            log::info!("{}", report);
            0
        }
        Err(e) => {
            report_failure(target, &e);
            1
        }
    }
}

fn report_failure(target: &str, error: &SyncError) {
    match error.category() {
        ErrorCategory::Timeout => log::error!("{} timed out: {}", target, error),
        ErrorCategory::Connection => log::error!("{} connection failed: {}", target, error),
        ErrorCategory::Other => log::error!("{} failed: {}", target, error),
    }
}
