use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Good,
    Bad,
}

impl Vote {
    pub fn as_str(self) -> &'static str {
        match self {
            Vote::Good => "good",
            Vote::Bad => "bad",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "good" => Ok(Vote::Good),
            "bad" => Ok(Vote::Bad),
            _ => Err(AppError::bad_request("vote must be 'good' or 'bad'")),
        }
    }
}

/// Body of `POST /api/vote`. Fields are optional here so that a missing
/// field produces our own error body instead of the extractor's rejection.
#[derive(Debug, Default, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl VoteRequest {
    /// Returns the parsed vote and the timestamp to store. The client's
    /// timestamp is kept verbatim; an absent one falls back to `now`.
    pub fn validate(self, now: DateTime<Utc>) -> Result<(Vote, String), AppError> {
        let vote = self
            .vote
            .as_deref()
            .ok_or_else(|| AppError::bad_request("vote is required"))?
            .parse::<Vote>()?;

        let timestamp = match self.timestamp {
            Some(raw) if is_iso8601(&raw) => raw,
            Some(_) => {
                return Err(AppError::bad_request(
                    "timestamp must be an ISO-8601 date or date-time",
                ));
            }
            None => iso_timestamp(now),
        };

        Ok((vote, timestamp))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub vote: Vote,
    pub timestamp: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub received_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteAck {
    pub success: bool,
    pub message: String,
}

impl VoteAck {
    pub fn recorded() -> Self {
        Self {
            success: true,
            message: "Vote recorded".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

const LOCAL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const OFFSET_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%z",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Calendar dates and date-times in extended or basic format, with a `Z`
/// suffix, a numeric offset, or no zone at all.
pub fn is_iso8601(raw: &str) -> bool {
    let value = raw.trim();
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }

    let local = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);

    LOCAL_DATE_TIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(local, format).is_ok())
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|format| DateTime::parse_from_str(value, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// Millisecond precision with a `Z` suffix, the shape browsers produce.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
