use crate::config::types::{BackendConfig, Config, ScraperConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// A missing API key is the only fatal problem. Everything else is logged
/// as a warning and left to fail later, per query or per batch, where the
/// run already recovers from errors.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.backend.api_key.trim().is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    for warning in config_warnings(config) {
        tracing::warn!("Configuration: {}", warning);
    }

    Ok(())
}

/// Collects non-fatal configuration problems
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    check_backend_config(&config.backend, &mut warnings);
    check_search_config(&config.search, &mut warnings);
    check_scraper_config(&config.scraper, &mut warnings);
    warnings
}

/// Checks bulk-import endpoint configuration
fn check_backend_config(config: &BackendConfig, warnings: &mut Vec<String>) {
    warnings.extend(check_http_url("base_url", &config.base_url));

    if config.batch_size < 1 {
        warnings.push(format!(
            "batch_size must be >= 1, got {}; uploading one job per batch",
            config.batch_size
        ));
    }
}

/// Checks search parameters
fn check_search_config(config: &SearchConfig, warnings: &mut Vec<String>) {
    if config.queries.is_empty() {
        warnings.push("no search queries configured, nothing will be scraped".to_string());
    }

    if config.queries.iter().any(|q| q.trim().is_empty()) {
        warnings.push("search queries contain a blank entry".to_string());
    }

    if config.location.trim().is_empty() {
        warnings.push("location is empty".to_string());
    }

    if config.results_wanted < 1 {
        warnings.push(format!(
            "results_wanted should be >= 1, got {}",
            config.results_wanted
        ));
    }
}

/// Checks scraping service configuration
fn check_scraper_config(config: &ScraperConfig, warnings: &mut Vec<String>) {
    warnings.extend(check_http_url("scraper api_url", &config.api_url));
}

/// Reports anything other than an absolute http or https URL with a host
fn check_http_url(name: &str, value: &str) -> Option<String> {
    let url = match Url::parse(value) {
        Ok(url) => url,
        Err(e) => return Some(format!("invalid {} '{}': {}", name, value, e)),
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Some(format!("{} '{}' should use http or https", name, value));
    }

    if url.host_str().is_none() {
        return Some(format!("{} '{}' has no host", name, value));
    }

    None
}
