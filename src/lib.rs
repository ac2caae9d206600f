//! Job-Importer: a one-pass job board harvester
//!
//! This crate scrapes job postings from Indeed and Google Jobs, normalizes
//! every listing into the canonical job schema, drops duplicate listings and
//! uploads the result in fixed-size batches to a bulk-import endpoint.

pub mod config;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod scrape;
pub mod upload;

use thiserror::Error;

/// Main error type for Job-Importer operations
#[derive(Debug, Error)]
pub enum ImporterError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CRON_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for Job-Importer operations
pub type Result<T> = std::result::Result<T, ImporterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use normalize::{normalize_row, CanonicalJob, JobCollector, MapOutcome};
pub use output::RunSummary;
pub use pipeline::Pipeline;
pub use scrape::{JobScraper, JobSpyClient, RawJobRow, ScrapeRequest};
pub use upload::{ImportClient, ImportCounts};
