//! Distributor stock feed download and parsing
//!
//! The distributor publishes a zip archive holding one spreadsheet. The
//! archive is downloaded and unpacked in memory; nothing touches the disk.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Reader};
use log::{debug, info};

use crate::error::{Result, SyncError};

use super::record::FeedRecord;
use super::table::{cell_text, records_from_rows};

/// Distributor stock archive
pub const FEED_URL: &str = "https://timeworld.ru/upload/files/ostatki.zip";
/// 0-based row holding the column names in the distributor's spreadsheet
pub const HEADER_ROW: usize = 17;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// Downloads and parses the distributor's stock feed
pub struct FeedFetcher {
    client: reqwest::Client,
    url: String,
    header_row: usize,
}

impl FeedFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: FEED_URL.to_string(),
            header_row: HEADER_ROW,
        }
    }

    /// Overrides the archive URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Overrides the header row index.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    /// Download the archive and parse the spreadsheet inside it
    pub async fn fetch(&self) -> Result<Vec<FeedRecord>> {
        info!("Downloading stock feed from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Feed download failed with status {status}");
            return Err(SyncError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        info!("Downloaded {} bytes of feed archive", bytes.len());

        records_from_archive(bytes.to_vec(), self.header_row)
    }

    /// Parse a feed file from disk instead of downloading it.
    ///
    /// Accepts the zip archive itself, a bare spreadsheet, or a CSV export.
    pub fn load_file(&self, path: &Path) -> Result<Vec<FeedRecord>> {
        info!("Loading stock feed from {}", path.display());

        let name = path.to_string_lossy().to_lowercase();
        let bytes = std::fs::read(path)?;
        match extension(&name) {
            Some("zip") => records_from_archive(bytes, self.header_row),
            Some("csv") => records_from_csv(bytes.as_slice(), self.header_row),
            Some(ext) if SPREADSHEET_EXTENSIONS.contains(&ext) => {
                records_from_spreadsheet(bytes, self.header_row)
            }
            _ => Err(SyncError::UnsupportedFeed(path.display().to_string())),
        }
    }
}

fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Parse the first spreadsheet (or CSV) entry of a zip archive
pub fn records_from_archive(bytes: Vec<u8>, header_row: usize) -> Result<Vec<FeedRecord>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    debug!("Feed archive holds {} entries", archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_lowercase();
        let is_csv = extension(&name) == Some("csv");
        let is_sheet = extension(&name).is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext));
        if !is_csv && !is_sheet {
            debug!("Skipping archive entry {name}");
            continue;
        }

        info!("Reading {} from feed archive", entry.name());
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;

        return if is_csv {
            records_from_csv(content.as_slice(), header_row)
        } else {
            records_from_spreadsheet(content, header_row)
        };
    }

    Err(SyncError::EmptyArchive)
}

/// Parse the first worksheet of an xls/xlsx/ods workbook
pub fn records_from_spreadsheet(bytes: Vec<u8>, header_row: usize) -> Result<Vec<FeedRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SyncError::EmptyWorkbook)??;

    // The range starts at the first used cell; pad so row indices match the sheet.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    debug!(
        "Worksheet holds {} rows starting at row {}",
        range.height(),
        first_row
    );

    let rows = std::iter::repeat_with(Vec::new)
        .take(first_row)
        .chain(
            range
                .rows()
                .map(|cells| cells.iter().map(cell_text).collect::<Vec<_>>()),
        );

    records_from_rows(rows, header_row)
}

/// Parse a CSV export of the feed; the delimiter is sniffed from the content
pub fn records_from_csv<R: Read>(mut reader: R, header_row: usize) -> Result<Vec<FeedRecord>> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    let delimiter = sniff_delimiter(&content);
    debug!("Reading feed CSV with delimiter '{}'", delimiter as char);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_slice());

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    records_from_rows(rows, header_row)
}

/// Semicolon when it outnumbers commas in the content, comma otherwise
fn sniff_delimiter(content: &[u8]) -> u8 {
    let semicolons = content.iter().filter(|&&b| b == b';').count();
    let commas = content.iter().filter(|&&b| b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
