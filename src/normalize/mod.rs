//! Normalization module
//!
//! This module turns raw job board rows into canonical job records:
//! - Field mapping with a defined fallback for every malformed input
//! - Run-wide deduplication by listing URL
//! - Non-finite float cleanup ahead of serialization

mod dedupe;
mod job;
mod mapper;
mod sanitize;

pub use dedupe::{Admission, JobCollector};
pub use job::{CanonicalJob, ContractTime, DESCRIPTION_MAX_CHARS};
pub use mapper::{
    normalize_row, normalize_row_at, parse_posted_date, safe_int, truncate_chars, MapOutcome,
    RejectReason,
};
pub use sanitize::Sanitize;
