//! Pipeline coordinator - run orchestration logic
//!
//! This module contains the linear run loop:
//! - One scrape per query, failures logged and skipped
//! - Normalization and deduplication into a single ordered list
//! - Batched upload with per-batch failure accounting
//! - Summary assembly

use crate::config::Config;
use crate::normalize::JobCollector;
use crate::output::{QueryOutcome, QueryReport, RunSummary};
use crate::scrape::{JobScraper, JobSpyClient, ScrapeRequest};
use crate::upload::{upload_batches, ImportClient, ImportTotals};
use crate::ImporterError;

/// Records gathered by the scrape and normalization stages
#[derive(Debug, Default)]
pub struct Collection {
    pub collector: JobCollector,
    pub queries: Vec<QueryReport>,
}

/// Main pipeline structure
pub struct Pipeline<S> {
    config: Config,
    scraper: S,
    uploader: ImportClient,
}

impl Pipeline<JobSpyClient> {
    /// Creates a pipeline backed by the JobSpy service named in `config`
    pub fn from_config(config: Config) -> Result<Self, ImporterError> {
        let scraper = JobSpyClient::new(&config.scraper)?;
        let uploader = ImportClient::new(&config.backend)?;
        Ok(Self::new(config, scraper, uploader))
    }
}

impl<S: JobScraper> Pipeline<S> {
    pub fn new(config: Config, scraper: S, uploader: ImportClient) -> Self {
        Self {
            config,
            scraper,
            uploader,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the scrape and normalization stages
    ///
    /// Queries are processed in configuration order, so when two queries
    /// return the same listing the earlier query keeps it.
    pub async fn collect(&self) -> Collection {
        let mut collection = Collection::default();

        for query in &self.config.search.queries {
            let request = ScrapeRequest::for_query(query, &self.config.search);
            tracing::info!("Scraping: '{}' from {} ...", query, request.sites_label());

            let outcome = match self.scraper.scrape(&request).await {
                Ok(rows) => {
                    let added = collection.collector.ingest(&rows);
                    tracing::info!(
                        "  Got {} unique jobs (total so far: {})",
                        added,
                        collection.collector.len()
                    );
                    QueryOutcome::Scraped {
                        rows: rows.len(),
                        added,
                    }
                }
                Err(e) => {
                    tracing::error!("  Error scraping '{}': {}", query, e);
                    QueryOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            collection.queries.push(QueryReport {
                query: query.clone(),
                outcome,
            });
        }

        collection
    }

    /// Runs every stage and returns the run summary
    ///
    /// Never fails: scrape and upload failures are logged, counted, and
    /// skipped. When nothing was collected the upload stage is not entered.
    pub async fn run(&self) -> RunSummary {
        let Collection { collector, queries } = self.collect().await;

        let mut summary = RunSummary {
            queries,
            rows_seen: collector.rows_seen(),
            rows_rejected: collector.rejected(),
            duplicates: collector.duplicates(),
            jobs_collected: collector.len(),
            totals: ImportTotals::default(),
        };

        if collector.is_empty() {
            tracing::warn!("No jobs scraped, nothing to upload");
            return summary;
        }

        let jobs = collector.into_jobs();
        tracing::info!(
            "Uploading {} jobs to {} in batches of {}",
            jobs.len(),
            self.uploader.endpoint(),
            self.config.backend.batch_size
        );

        summary.totals =
            upload_batches(&self.uploader, &jobs, self.config.backend.batch_size).await;

        tracing::info!(
            "Upload finished: {} batches sent, {} failed",
            summary.totals.batches_sent,
            summary.totals.batches_failed
        );

        summary
    }
}
