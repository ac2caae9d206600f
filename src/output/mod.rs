//! Output module for run reporting
//!
//! This module handles:
//! - Collecting per-query and per-batch outcomes into a run summary
//! - Printing the end-of-run report

pub mod stats;

pub use stats::{print_summary, QueryOutcome, QueryReport, RunSummary};
