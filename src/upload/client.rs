//! Bulk-import HTTP client
//!
//! One call to [`ImportClient::post_batch`] is one POST of
//! `{"jobs": [...]}` to `{base_url}/api/cron/bulk-import`. Non-finite floats
//! are cleaned from the batch before it is serialized.

use crate::config::{BackendConfig, UPLOAD_TIMEOUT_SECS};
use crate::normalize::{CanonicalJob, Sanitize};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const IMPORT_PATH: &str = "/api/cron/bulk-import";

/// Errors that can occur while uploading one batch
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Import endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed import response: {0}")]
    Decode(String),

    #[error("Failed to serialize batch: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Counts reported by the endpoint for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub imported: u64,
    pub updated: u64,
    pub errors: u64,
}

impl fmt::Display for ImportCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "imported={}, updated={}, errors={}",
            self.imported, self.updated, self.errors
        )
    }
}

/// Wire shape of the response; absent or null counts are zero
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountsResponse {
    imported: Option<u64>,
    updated: Option<u64>,
    errors: Option<u64>,
}

#[derive(Serialize)]
struct ImportPayload<'a> {
    jobs: &'a [CanonicalJob],
}

/// Builds the HTTP client used for uploads
pub fn build_import_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("job-importer/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .build()
}

/// Decodes a success body into counts
///
/// The body must be a JSON object. Missing or null counts are zero; any
/// other shape is a decode error.
pub(crate) fn decode_counts(body: &str) -> Result<ImportCounts, UploadError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| UploadError::Decode(e.to_string()))?;

    if !value.is_object() {
        return Err(UploadError::Decode(format!(
            "expected a JSON object, got {}",
            value
        )));
    }

    let counts: CountsResponse =
        serde_json::from_value(value).map_err(|e| UploadError::Decode(e.to_string()))?;

    Ok(ImportCounts {
        imported: counts.imported.unwrap_or(0),
        updated: counts.updated.unwrap_or(0),
        errors: counts.errors.unwrap_or(0),
    })
}

/// Client for the bulk-import endpoint
pub struct ImportClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ImportClient {
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_import_client()?, config))
    }

    pub fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), IMPORT_PATH),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one batch and returns the endpoint's counts
    ///
    /// # Returns
    ///
    /// * `Ok(ImportCounts)` - 2xx response with a JSON object body
    /// * `Err(UploadError)` - Transport failure, non-2xx status, or unreadable body
    pub async fn post_batch(&self, jobs: &[CanonicalJob]) -> Result<ImportCounts, UploadError> {
        let mut cleaned = jobs.to_vec();
        cleaned.sanitize();
        let body = serde_json::to_vec(&ImportPayload { jobs: &cleaned })?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header("X-API-Key", &self.api_key)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        decode_counts(&body)
    }
}
