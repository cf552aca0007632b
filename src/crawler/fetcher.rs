//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Retry logic for transient failures
//! - The pacing delay that follows every response
//! - Error classification

use crate::config::{Config, HttpConfig, UserAgentConfig};
use crate::crawler::Document;
use crate::FetchError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// When and how often a request is retried
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub retries: u32,

    /// Delay before retry `n` (0-based) is `backoff_factor * 2^n` seconds
    pub backoff_factor: f64,

    /// Response statuses that trigger a retry
    pub status_forcelist: Vec<u16>,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            retries: config.retries,
            backoff_factor: config.backoff_factor,
            status_forcelist: config.status_forcelist.clone(),
        }
    }

    /// Delay before the given retry
    pub fn delay(&self, attempt: u32) -> Duration {
        let seconds = self.backoff_factor * 2f64.powi(attempt.min(16) as i32);
        if seconds.is_finite() && seconds > 0.0 {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }

    /// Returns true if a response with this status should be retried
    pub fn retries_status(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Returns true if a transport error should be retried
    ///
    /// Covers failures to connect, to send, and to read the body, as well as
    /// timeouts in any of those phases.
    pub fn retries_error(&self, error: &reqwest::Error) -> bool {
        error.is_connect() || error.is_timeout() || error.is_request() || error.is_body()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts for the session
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use catalog_crawl::config::{HttpConfig, UserAgentConfig};
/// use catalog_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(http.timeout())
        .connect_timeout(http.connect_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// The HTTP session shared by every request of one crawl
///
/// Requests are issued one at a time. The session is released when dropped.
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    retry: RetryPolicy,
    timeout: Duration,
    pacing: Duration,
}

impl HttpSession {
    /// Opens a session from the crawl configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        tracing::debug!("HTTP session opened");

        Ok(Self {
            client,
            retry: RetryPolicy::from_config(&config.http),
            timeout: config.http.timeout(),
            pacing: config.http.pacing(),
        })
    }

    /// Fetches a URL and parses the body as HTML
    ///
    /// # Request Flow
    ///
    /// 1. Send GET and read the body, retrying the pair per the [`RetryPolicy`]
    /// 2. Log the response status
    /// 3. Sleep the pacing delay (after every response, success or not)
    /// 4. Turn a non-2xx status into [`FetchError::Status`]
    /// 5. Parse the body
    ///
    /// Every failure is logged with the URL before being returned.
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let result = self.fetch_document(url).await;

        if let Err(e) = &result {
            match e {
                FetchError::Status { .. } => tracing::error!("HTTP error occurred: {}", e),
                FetchError::Connect { .. } => tracing::error!("Connection error occurred: {}", e),
                FetchError::Timeout { .. } => tracing::error!("Timeout error occurred: {}", e),
                FetchError::Request { .. } => tracing::error!("Request error occurred: {}", e),
                FetchError::Unexpected { .. } => {
                    tracing::error!("An unexpected error occurred: {}", e)
                }
            }
        }

        result
    }

    async fn fetch_document(&self, url: &str) -> Result<Document, FetchError> {
        let target = Url::parse(url).map_err(|e| FetchError::Unexpected {
            url: url.to_string(),
            message: format!("invalid URL: {}", e),
        })?;

        let (status, body) = self
            .get_with_retry(target)
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        tracing::debug!("URL: {}, Status Code: {}", url, status.as_u16());

        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(Document::parse(url, &body))
    }

    /// Runs [`HttpSession::get_once`], retrying retryable statuses and
    /// transport errors
    ///
    /// Once retries are exhausted the last response or error is returned as is.
    async fn get_with_retry(&self, url: Url) -> Result<(StatusCode, String), reqwest::Error> {
        let mut attempt = 0;

        loop {
            let result = self.get_once(url.clone()).await;

            let retry_reason = match &result {
                Ok((status, _)) if self.retry.retries_status(status.as_u16()) => {
                    Some(format!("status {}", status))
                }
                Err(e) if self.retry.retries_error(e) => Some(e.to_string()),
                _ => None,
            };

            match retry_reason {
                Some(reason) if attempt < self.retry.retries => {
                    let delay = self.retry.delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        "Retrying {} ({}/{}) in {:?}: {}",
                        url,
                        attempt,
                        self.retry.retries,
                        delay,
                        reason
                    );
                    tokio::time::sleep(delay).await;
                }
                _ => return result,
            }
        }
    }

    /// One GET, body included
    ///
    /// The body of a non-2xx response is not read.
    async fn get_once(&self, url: Url) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Ok((status, String::new()));
        }

        let body = response.text().await?;
        Ok((status, body))
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        tracing::debug!("HTTP session closed");
    }
}
