//! Row to record mapping
//!
//! Every field has a defined fallback, so mapping never fails: a row either
//! becomes a [`CanonicalJob`] or is rejected for a missing required field.

use crate::config::DEFAULT_LOCATION;
use crate::normalize::job::{CanonicalJob, ContractTime, DESCRIPTION_MAX_CHARS};
use crate::scrape::{RawJobRow, RawValue, Site};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// Naive datetime layouts accepted for `date_posted`, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Why a row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingTitle,
    MissingCompany,
    MissingUrl,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingTitle => "missing title",
            Self::MissingCompany => "missing company",
            Self::MissingUrl => "missing job URL",
        };
        f.write_str(reason)
    }
}

/// Result of mapping one row
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    Accepted(CanonicalJob),
    Rejected(RejectReason),
}

impl MapOutcome {
    pub fn into_job(self) -> Option<CanonicalJob> {
        match self {
            Self::Accepted(job) => Some(job),
            Self::Rejected(_) => None,
        }
    }
}

/// Maps a raw row using the current time as the posted-date fallback
pub fn normalize_row(row: &RawJobRow) -> MapOutcome {
    normalize_row_at(row, Utc::now())
}

/// Maps a raw row, using `now` when the posted date is missing or unreadable
pub fn normalize_row_at(row: &RawJobRow, now: DateTime<Utc>) -> MapOutcome {
    let Some(title) = row.title() else {
        return MapOutcome::Rejected(RejectReason::MissingTitle);
    };
    let Some(company) = row.company() else {
        return MapOutcome::Rejected(RejectReason::MissingCompany);
    };
    let Some(job_url) = row.job_url() else {
        return MapOutcome::Rejected(RejectReason::MissingUrl);
    };

    let state = row.state();
    let location = match (row.city(), state) {
        (Some(city), Some(state)) => format!("{}, {}", city, state),
        (Some(city), None) => city.to_string(),
        (None, Some(state)) => state.to_string(),
        (None, None) => row.location().unwrap_or(DEFAULT_LOCATION).to_string(),
    };

    let source = row
        .site()
        .and_then(|site| Site::parse(&site))
        .unwrap_or(Site::Indeed);

    let contract_time = row
        .job_type()
        .and_then(|job_type| ContractTime::from_job_type(&job_type));

    MapOutcome::Accepted(CanonicalJob {
        title: title.to_string(),
        company: company.to_string(),
        location,
        state: state.map(String::from),
        remote: u8::from(row.is_remote()),
        description: truncate_chars(row.description().unwrap_or(""), DESCRIPTION_MAX_CHARS),
        requirements: "[]".to_string(),
        salary_min: safe_int(row.min_amount()),
        salary_max: safe_int(row.max_amount()),
        posted_date: parse_posted_date(row.date_posted(), now),
        source,
        external_url: job_url.to_string(),
        contract_time,
        contract_type: None,
        category_tag: None,
        category_label: None,
        salary_is_predicted: 0,
        latitude: None,
        longitude: None,
        adref: None,
    })
}

/// Converts a loose value to an integer
///
/// Integers pass through, finite floats are truncated toward zero and
/// integral text is parsed. NaN, infinities, booleans and anything
/// non-numeric become `None`.
pub fn safe_int(value: Option<&RawValue>) -> Option<i64> {
    match value? {
        RawValue::Int(n) => Some(*n),
        RawValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        RawValue::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Resolves a posting date to Unix seconds
///
/// ISO text is parsed (RFC 3339, naive datetime, or bare date; naive values
/// are UTC), numbers are taken as Unix seconds, and everything else falls
/// back to `now`.
pub fn parse_posted_date(value: Option<&RawValue>, now: DateTime<Utc>) -> i64 {
    match value {
        Some(RawValue::Text(s)) => parse_iso_timestamp(s.trim()).unwrap_or_else(|| now.timestamp()),
        Some(RawValue::Int(n)) => *n,
        Some(RawValue::Float(f)) if f.is_finite() => f.trunc() as i64,
        _ => now.timestamp(),
    }
}

fn parse_iso_timestamp(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}

/// Keeps at most `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_index, _)) => s[..byte_index].to_string(),
        None => s.to_string(),
    }
}
