use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Catalog-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Which catalog layout (and record type) the crawl targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// A book store: records are [`crate::BookRecord`]
    #[default]
    Books,
    /// A regional species database: records are [`crate::SpeciesRecord`]
    Species,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub kind: SiteKind,

    /// Root of the catalog, must end with `/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Category index page, relative to `base-url`
    #[serde(rename = "index-path")]
    pub index_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            kind: SiteKind::Books,
            base_url: "https://books.toscrape.com/".to_string(),
            index_path: "index.html".to_string(),
        }
    }
}

/// HTTP session behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-fetch timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of retries per request
    pub retries: u32,

    /// Retry delay is `backoff-factor * 2^attempt` seconds
    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    /// Response statuses that trigger a retry
    #[serde(rename = "status-forcelist")]
    pub status_forcelist: Vec<u16>,

    /// Delay after every response (milliseconds)
    #[serde(rename = "pacing-ms")]
    pub pacing_ms: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            connect_timeout_secs: 10,
            retries: 3,
            backoff_factor: 0.5,
            status_forcelist: vec![500, 502, 503, 504],
            pacing_ms: 1000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "catalog-crawl".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/catalog-crawl".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the workbook that receives one sheet per category
    #[serde(rename = "workbook-path")]
    pub workbook_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_path: "booklist_sample.xlsx".to_string(),
        }
    }
}
