//! Raw job board rows
//!
//! Job boards return loosely-typed records: any column may be missing, null,
//! a number where text was expected, or text where a number was expected.
//! [`RawJobRow`] keeps every column as an optional [`RawValue`] and exposes
//! null-safe getters so the normalizer never has to guess at shapes.

use serde::Deserialize;

/// A single loosely-typed column value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Arrays, objects, or anything else the board sends
    Other(serde_json::Value),
}

impl RawValue {
    /// Returns the value as text if it is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One listing as returned by a job board
///
/// Unknown columns are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawJobRow {
    pub title: Option<RawValue>,
    pub company: Option<RawValue>,
    pub city: Option<RawValue>,
    pub state: Option<RawValue>,
    pub location: Option<RawValue>,
    pub is_remote: Option<RawValue>,
    pub description: Option<RawValue>,
    pub min_amount: Option<RawValue>,
    pub max_amount: Option<RawValue>,
    pub date_posted: Option<RawValue>,
    pub site: Option<RawValue>,
    pub job_type: Option<RawValue>,
    pub job_url: Option<RawValue>,
}

/// Text content of a column, or `None` for missing, non-text, or blank values
fn text(value: &Option<RawValue>) -> Option<&str> {
    value
        .as_ref()
        .and_then(RawValue::as_text)
        .filter(|s| !s.trim().is_empty())
}

impl RawJobRow {
    /// Title text; whitespace-only titles count as missing
    pub fn title(&self) -> Option<&str> {
        text(&self.title)
    }

    pub fn company(&self) -> Option<&str> {
        text(&self.company)
    }

    pub fn city(&self) -> Option<&str> {
        text(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        text(&self.state)
    }

    pub fn location(&self) -> Option<&str> {
        text(&self.location)
    }

    pub fn description(&self) -> Option<&str> {
        text(&self.description)
    }

    pub fn job_url(&self) -> Option<&str> {
        text(&self.job_url)
    }

    /// True only for an explicit boolean `true`
    pub fn is_remote(&self) -> bool {
        matches!(self.is_remote, Some(RawValue::Bool(true)))
    }

    pub fn min_amount(&self) -> Option<&RawValue> {
        self.min_amount.as_ref()
    }

    pub fn max_amount(&self) -> Option<&RawValue> {
        self.max_amount.as_ref()
    }

    pub fn date_posted(&self) -> Option<&RawValue> {
        self.date_posted.as_ref()
    }

    /// Board identifier, lowercased
    pub fn site(&self) -> Option<String> {
        text(&self.site).map(|s| s.trim().to_lowercase())
    }

    /// Job type label, lowercased
    pub fn job_type(&self) -> Option<String> {
        text(&self.job_type).map(|s| s.trim().to_lowercase())
    }
}
