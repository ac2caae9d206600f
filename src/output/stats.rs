//! Run statistics
//!
//! This module provides the summary produced by one pipeline run and the
//! functions that print it.

use crate::upload::ImportTotals;

/// What happened to one search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The scrape succeeded
    Scraped {
        /// Rows returned by the boards
        rows: usize,
        /// New unique records kept from those rows
        added: usize,
    },

    /// The scrape failed and the query was skipped
    Failed { error: String },
}

/// Outcome of one query, in processing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub query: String,
    pub outcome: QueryOutcome,
}

/// Summary of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: Vec<QueryReport>,

    /// Rows returned across all successful queries
    pub rows_seen: usize,

    /// Rows dropped for missing required fields
    pub rows_rejected: usize,

    /// Rows dropped because their URL was already collected
    pub duplicates: usize,

    /// Unique records handed to the upload stage
    pub jobs_collected: usize,

    pub totals: ImportTotals,
}

impl RunSummary {
    pub fn queries_failed(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| matches!(q.outcome, QueryOutcome::Failed { .. }))
            .count()
    }

    /// The closing report line
    pub fn final_line(&self) -> String {
        format!(
            "Done! Imported: {}, Updated: {}, Errors: {}",
            self.totals.imported, self.totals.updated, self.totals.errors
        )
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== Import Summary ===\n");

    println!("Queries ({}):", summary.queries.len());
    for report in &summary.queries {
        match &report.outcome {
            QueryOutcome::Scraped { rows, added } => {
                println!("  {}: {} rows, {} new", report.query, rows, added);
            }
            QueryOutcome::Failed { error } => {
                println!("  {}: FAILED ({})", report.query, error);
            }
        }
    }
    println!();

    println!("Normalization:");
    println!("  Rows scraped: {}", summary.rows_seen);
    println!("  Rejected: {}", summary.rows_rejected);
    println!("  Duplicates: {}", summary.duplicates);
    println!("  Unique jobs: {}", summary.jobs_collected);
    println!();

    println!("Upload:");
    println!("  Batches sent: {}", summary.totals.batches_sent);
    println!("  Batches failed: {}", summary.totals.batches_failed);
    println!();

    println!("{}", summary.final_line());
}
