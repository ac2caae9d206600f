use crate::normalize::CanonicalJob;
use crate::upload::{ImportClient, ImportCounts, UploadError};

/// Result of sending one batch
#[derive(Debug)]
pub enum BatchOutcome {
    /// The endpoint accepted the batch and reported counts
    Sent { size: usize, counts: ImportCounts },

    /// The batch could not be delivered; every job in it counts as an error
    Failed { size: usize, error: UploadError },
}

/// Cumulative counts over every batch of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTotals {
    pub imported: u64,
    pub updated: u64,
    pub errors: u64,
    pub batches_sent: usize,
    pub batches_failed: usize,
}

impl ImportTotals {
    /// Folds one batch outcome into the totals
    pub fn record(&mut self, outcome: &BatchOutcome) {
        match outcome {
            BatchOutcome::Sent { counts, .. } => {
                self.imported += counts.imported;
                self.updated += counts.updated;
                self.errors += counts.errors;
                self.batches_sent += 1;
            }
            BatchOutcome::Failed { size, .. } => {
                self.errors += *size as u64;
                self.batches_failed += 1;
            }
        }
    }
}

/// Sends `jobs` in consecutive batches of at most `batch_size`
///
/// Batches go out strictly one after another. A failed batch is logged and
/// counted, then the next batch is attempted; nothing is retried.
pub async fn upload_batches(
    client: &ImportClient,
    jobs: &[CanonicalJob],
    batch_size: usize,
) -> ImportTotals {
    let mut totals = ImportTotals::default();

    for (index, batch) in jobs.chunks(batch_size.max(1)).enumerate() {
        tracing::info!("Sending batch {} ({} jobs) ...", index + 1, batch.len());

        let outcome = match client.post_batch(batch).await {
            Ok(counts) => {
                tracing::info!("  Result: {}", counts);
                BatchOutcome::Sent {
                    size: batch.len(),
                    counts,
                }
            }
            Err(error) => {
                tracing::error!("  Error sending batch {}: {}", index + 1, error);
                BatchOutcome::Failed {
                    size: batch.len(),
                    error,
                }
            }
        };

        totals.record(&outcome);
    }

    totals
}
