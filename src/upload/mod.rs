//! Upload module for the bulk-import endpoint
//!
//! This module contains the sink side of the pipeline:
//! - An HTTP client that POSTs one batch of records
//! - Batching with per-batch failure accounting

mod batch;
mod client;

pub use batch::{upload_batches, BatchOutcome, ImportTotals};
pub use client::{build_import_client, ImportClient, ImportCounts, UploadError, IMPORT_PATH};
