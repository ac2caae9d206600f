//! Scrape module for querying job boards
//!
//! This module contains the source side of the pipeline:
//! - The loosely-typed row shape returned by job boards
//! - The [`JobScraper`] seam and its request type
//! - An HTTP client for a JobSpy-compatible scraping service

mod jobspy;
mod row;
mod source;

pub use jobspy::{build_scraper_client, JobSpyClient, SCRAPE_TIMEOUT_SECS};
pub use row::{RawJobRow, RawValue};
pub use source::{JobScraper, ScrapeError, ScrapeRequest, ScrapeResult, Site};
