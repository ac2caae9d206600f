//! Run-wide deduplication
//!
//! [`JobCollector`] owns the ordered list of accepted records and the set of
//! listing URLs seen so far. The set is updated as soon as a record is
//! admitted, so when two queries return the same listing the one processed
//! first wins.

use crate::normalize::job::CanonicalJob;
use crate::normalize::mapper::{normalize_row, MapOutcome};
use crate::scrape::RawJobRow;
use std::collections::HashSet;

/// Whether a record was kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Added,
    Duplicate,
}

/// Accumulates unique records across every query of a run
#[derive(Debug, Default)]
pub struct JobCollector {
    seen: HashSet<String>,
    jobs: Vec<CanonicalJob>,
    rows_seen: usize,
    rejected: usize,
    duplicates: usize,
}

impl JobCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `job` unless its URL was already admitted
    pub fn admit(&mut self, job: CanonicalJob) -> Admission {
        if self.seen.contains(&job.external_url) {
            self.duplicates += 1;
            return Admission::Duplicate;
        }

        self.seen.insert(job.external_url.clone());
        self.jobs.push(job);
        Admission::Added
    }

    /// Normalizes and admits every row in order
    ///
    /// # Returns
    ///
    /// The number of new unique records added from `rows`
    pub fn ingest(&mut self, rows: &[RawJobRow]) -> usize {
        let mut added = 0;

        for row in rows {
            self.rows_seen += 1;

            match normalize_row(row) {
                MapOutcome::Accepted(job) => {
                    let url = job.external_url.clone();
                    match self.admit(job) {
                        Admission::Added => added += 1,
                        Admission::Duplicate => {
                            tracing::debug!("Skipping duplicate listing {}", url);
                        }
                    }
                }
                MapOutcome::Rejected(reason) => {
                    self.rejected += 1;
                    tracing::debug!("Rejected row: {}", reason);
                }
            }
        }

        added
    }

    pub fn jobs(&self) -> &[CanonicalJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_jobs(self) -> Vec<CanonicalJob> {
        self.jobs
    }
}
