//! Distributor stock feed: download, unpack and parse into records

mod fetch;
mod record;
mod table;

pub use fetch::{
    records_from_archive, records_from_csv, records_from_spreadsheet, FeedFetcher, FEED_URL,
    HEADER_ROW,
};
pub use record::{normalize_price, parse_quantity, FeedRecord};
pub use table::{records_from_rows, CODE_COLUMN, PRICE_COLUMN, QUANTITY_COLUMN};
