//! Error types for watch_stock_sync

use thiserror::Error;

/// Unified error type for feed, reconciliation and marketplace operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse or build a JSON payload
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Marketplace answered with a non-success status
    #[error("HTTP error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feed archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Feed spreadsheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Feed CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Feed archive holds no spreadsheet
    #[error("No spreadsheet found in feed archive")]
    EmptyArchive,

    /// Feed spreadsheet has no worksheet to read
    #[error("Feed spreadsheet has no worksheets")]
    EmptyWorkbook,

    /// Feed file extension is not one we can read
    #[error("Unsupported feed file: {0}")]
    UnsupportedFeed(String),

    /// Feed header row lacks a required column
    #[error("Feed column '{column}' not found in header row {row}")]
    MissingColumn { column: &'static str, row: usize },

    /// Quantity indicator is neither a known category nor a number
    #[error("Invalid quantity '{value}' for offer {code}")]
    InvalidQuantity { code: String, value: String },

    /// Price text holds no digits before the decimal separator
    #[error("Invalid price '{value}' for offer {code}")]
    InvalidPrice { code: String, value: String },

    /// Required setting is not configured
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

/// Failure classes reported at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Connection,
    Other,
}

impl SyncError {
    /// Classify the error the way the top level reports it
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            SyncError::Network(e) if e.is_connect() => ErrorCategory::Connection,
            _ => ErrorCategory::Other,
        }
    }
}

/// Result alias for watch_stock_sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
