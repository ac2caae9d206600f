//! Pipeline module for a complete import run
//!
//! This module wires the three stages together:
//! - Scraping every configured query
//! - Normalizing and deduplicating the returned rows
//! - Uploading the unique records in batches

mod coordinator;

pub use coordinator::{Collection, Pipeline};

use crate::config::Config;
use crate::output::RunSummary;
use crate::ImporterError;

/// Runs a complete import against the configured JobSpy service
///
/// This is the main entry point for an import. It will:
/// 1. Build the scraper and upload HTTP clients
/// 2. Scrape each query in order, skipping queries that fail
/// 3. Normalize and deduplicate the rows
/// 4. Upload the unique records batch by batch
///
/// # Returns
///
/// * `Ok(RunSummary)` - The run finished; per-query and per-batch failures
///   are reflected in the summary
/// * `Err(ImporterError)` - An HTTP client could not be built
pub async fn run_import(config: Config) -> Result<RunSummary, ImporterError> {
    let pipeline = Pipeline::from_config(config)?;
    Ok(pipeline.run().await)
}
