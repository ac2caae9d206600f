//! JobSpy service client
//!
//! Talks to a JobSpy-compatible HTTP service, which wraps the `python-jobspy`
//! scrapers behind `GET /api/v1/search_jobs`. The service owns all
//! board-specific scraping; this client only forwards the request and
//! decodes the returned rows.

use crate::config::ScraperConfig;
use crate::scrape::{JobScraper, RawJobRow, ScrapeError, ScrapeRequest, ScrapeResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Scrapes hit several boards in one call and routinely take minutes
pub const SCRAPE_TIMEOUT_SECS: u64 = 300;

const SEARCH_PATH: &str = "/api/v1/search_jobs";

/// Body of a successful search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    count: Option<u64>,
    jobs: Vec<RawJobRow>,
}

/// Builds the HTTP client used for scrape calls
pub fn build_scraper_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("job-importer/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(SCRAPE_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`JobScraper`] backed by a JobSpy-compatible HTTP service
pub struct JobSpyClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl JobSpyClient {
    /// Creates a client for the service described by `config`
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_scraper_client()?, config))
    }

    /// Creates a client that reuses an existing HTTP client
    pub fn with_client(client: Client, config: &ScraperConfig) -> Self {
        Self {
            client,
            endpoint: search_endpoint(&config.api_url),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn search_endpoint(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), SEARCH_PATH)
}

/// Flattens a request into query parameters; `site_name` repeats per board
fn query_params(request: &ScrapeRequest) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = request
        .sites
        .iter()
        .map(|site| ("site_name", site.as_str().to_string()))
        .collect();

    params.push(("search_term", request.search_term.clone()));
    params.push(("location", request.location.clone()));
    params.push(("results_wanted", request.results_wanted.to_string()));
    params.push(("hours_old", request.hours_old.to_string()));
    params.push((
        "enforce_annual_salary",
        request.enforce_annual_salary.to_string(),
    ));
    params.push(("country_indeed", request.country_indeed.clone()));
    params
}

impl JobScraper for JobSpyClient {
    async fn scrape(&self, request: &ScrapeRequest) -> ScrapeResult<Vec<RawJobRow>> {
        let http_error = |source| ScrapeError::Http {
            query: request.search_term.clone(),
            source,
        };

        let mut builder = self
            .client
            .get(&self.endpoint)
            .query(&query_params(request));
        if let Some(key) = &self.api_key {
            builder = builder.header("X-API-Key", key);
        }

        let response = builder.send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(http_error)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ScrapeError::Decode(e.to_string()))?;

        tracing::debug!(
            query = %request.search_term,
            reported = ?parsed.count,
            rows = parsed.jobs.len(),
            "Scraper response decoded"
        );

        Ok(parsed.jobs)
    }
}
