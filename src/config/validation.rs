use crate::config::types::{Config, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Smallest delay allowed between two requests (milliseconds)
pub const MIN_PACING_MS: u64 = 1000;

/// Largest accepted `backoff-factor` (seconds)
pub const MAX_BACKOFF_FACTOR: f64 = 60.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            config.base_url
        )));
    }

    if config.index_path.starts_with('/') || config.index_path.contains("..") {
        return Err(ConfigError::Validation(format!(
            "index-path '{}' must be relative to base-url",
            config.index_path
        )));
    }

    Ok(())
}

/// Validates HTTP session settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be >= 1s, got timeout-secs={} connect-timeout-secs={}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be <= 10, got {}",
            config.retries
        )));
    }

    if !config.backoff_factor.is_finite()
        || !(0.0..=MAX_BACKOFF_FACTOR).contains(&config.backoff_factor)
    {
        return Err(ConfigError::Validation(format!(
            "backoff-factor must be between 0 and {}, got {}",
            MAX_BACKOFF_FACTOR, config.backoff_factor
        )));
    }

    if let Some(status) = config
        .status_forcelist
        .iter()
        .find(|s| !(500..=599).contains(*s))
    {
        return Err(ConfigError::Validation(format!(
            "status-forcelist may only contain 5xx statuses, got {}",
            status
        )));
    }

    if config.pacing_ms < MIN_PACING_MS {
        return Err(ConfigError::Validation(format!(
            "pacing-ms must be >= {}ms, got {}ms",
            MIN_PACING_MS, config.pacing_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.workbook_path.is_empty() {
        return Err(ConfigError::Validation(
            "workbook_path cannot be empty".to_string(),
        ));
    }

    if !config.workbook_path.to_ascii_lowercase().ends_with(".xlsx") {
        return Err(ConfigError::Validation(format!(
            "workbook_path must name an .xlsx file, got '{}'",
            config.workbook_path
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    // Must contain exactly one @ with text on both sides and a dotted domain
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        ))),
    }
}
