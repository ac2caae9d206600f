use crate::scrape::Site;
use serde::Serialize;

/// Descriptions longer than this are cut to this many characters
pub const DESCRIPTION_MAX_CHARS: usize = 10_000;

/// Employment arrangement, as the import endpoint names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractTime {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl ContractTime {
    /// Maps a job board job type label (already lowercased)
    pub fn from_job_type(job_type: &str) -> Option<Self> {
        match job_type {
            "fulltime" => Some(Self::FullTime),
            "parttime" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

/// A job listing in the shape accepted by the bulk-import endpoint
///
/// Created once during normalization and never modified afterwards, except
/// by [`crate::normalize::Sanitize`] right before upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub state: Option<String>,
    /// 1 for remote listings, 0 otherwise
    pub remote: u8,
    pub description: String,
    /// JSON-encoded list; never populated from board data
    pub requirements: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    /// Unix timestamp, seconds
    pub posted_date: i64,
    pub source: Site,
    /// Listing URL; the record's natural key
    pub external_url: String,
    pub contract_time: Option<ContractTime>,
    pub contract_type: Option<String>,
    pub category_tag: Option<String>,
    pub category_label: Option<String>,
    pub salary_is_predicted: u8,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub adref: Option<String>,
}
