//! Catalog-Crawl: a polite catalog harvester
//!
//! This crate crawls paginated catalog websites (a book store, a regional
//! species database), extracts one record per detail page, groups the records
//! by category and writes each category as one spreadsheet sheet.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Catalog-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid path traversal: '{relative}' escapes the base path of {base}")]
    PathTraversal { base: String, relative: String },
}

/// Errors raised while fetching a page
///
/// The variants separate retryable network faults from everything else so
/// callers can tell a flaky site apart from a bug.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Connection error for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Request error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Unexpected error for {url}: {message}")]
    Unexpected { url: String, message: String },
}

impl FetchError {
    /// Classifies a transport error raised by reqwest
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_connect() {
            Self::Connect { url, source }
        } else if let Some(status) = source.status() {
            Self::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            Self::Request { url, source }
        }
    }

    /// Returns true for faults caused by the network rather than the page
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Connect { .. } | Self::Timeout { .. } => true,
            Self::Request { .. } | Self::Unexpected { .. } => false,
        }
    }

    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Connect { url, .. }
            | Self::Timeout { url }
            | Self::Request { url, .. }
            | Self::Unexpected { url, .. } => url,
        }
    }
}

/// Result type alias for Catalog-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use catalog::{BookRecord, CatalogRecord, Category, SpeciesRecord};
pub use config::Config;
pub use crawler::{crawl_and_persist, CatalogCrawl};
pub use output::{CrawlReport, SheetWriter, XlsxWorkbook};
pub use url::resolve_within;
