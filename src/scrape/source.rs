//! Scraper trait and error types
//!
//! This module defines the seam between the pipeline and whatever actually
//! talks to the job boards.

use crate::config::{SearchConfig, COUNTRY_INDEED};
use crate::scrape::RawJobRow;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur while scraping a single query
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for '{query}': {source}")]
    Http {
        query: String,
        source: reqwest::Error,
    },

    #[error("Scraper returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed scraper response: {0}")]
    Decode(String),
}

/// Result type for scrape operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Job boards queried on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Indeed,
    Google,
}

impl Site {
    /// The fixed provider list
    pub const ALL: [Site; 2] = [Site::Indeed, Site::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indeed => "indeed",
            Self::Google => "google",
        }
    }

    /// Parses a board identifier, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "indeed" => Some(Self::Indeed),
            "google" => Some(Self::Google),
            _ => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one scrape call
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub sites: Vec<Site>,
    pub search_term: String,
    pub location: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    /// Convert hourly/monthly pay to annual figures
    pub enforce_annual_salary: bool,
    pub country_indeed: String,
}

impl ScrapeRequest {
    /// Builds the request for one query using the shared search settings
    pub fn for_query(query: &str, search: &SearchConfig) -> Self {
        Self {
            sites: Site::ALL.to_vec(),
            search_term: query.to_string(),
            location: search.location.clone(),
            results_wanted: search.results_wanted,
            hours_old: search.hours_old,
            enforce_annual_salary: true,
            country_indeed: COUNTRY_INDEED.to_string(),
        }
    }

    /// Site list formatted for log output, e.g. `[indeed, google]`
    pub fn sites_label(&self) -> String {
        let names: Vec<&str> = self.sites.iter().map(Site::as_str).collect();
        format!("[{}]", names.join(", "))
    }
}

/// A source of raw job board rows
///
/// Implementations perform one scrape per call and return the rows in the
/// order the boards produced them. Failures are returned, never retried.
pub trait JobScraper {
    fn scrape(
        &self,
        request: &ScrapeRequest,
    ) -> impl Future<Output = ScrapeResult<Vec<RawJobRow>>> + Send;
}
