//! Configuration module for Job-Importer
//!
//! Configuration is assembled once at startup from three layers: built-in
//! defaults, an optional TOML file, and the process environment. The
//! resulting [`Config`] is immutable and passed by reference into each stage.
//!
//! # Example
//!
//! ```no_run
//! use job_importer::config::load_config;
//!
//! let config = load_config(None).unwrap();
//! println!("Uploading to: {}", config.backend.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BackendConfig, Config, FileBackend, FileConfig, FileScraper, FileSearch, ScraperConfig,
    SearchConfig, COUNTRY_INDEED, DEFAULT_BACKEND_URL, DEFAULT_BATCH_SIZE, DEFAULT_HOURS_OLD,
    DEFAULT_LOCATION, DEFAULT_QUERIES, DEFAULT_RESULTS_WANTED, DEFAULT_SCRAPER_URL,
    UPLOAD_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{
    apply_env, compute_config_hash, load_config, load_config_from, load_config_with_hash,
    parse_queries,
};
