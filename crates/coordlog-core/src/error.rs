use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::scope::UTC_FORMAT;

/// Why a single range token in a scope string was rejected.
#[derive(Debug, Error)]
pub enum ScopeFault {
    #[error("separator '::' is missing for start and end dates of range")]
    MissingSeparator,

    #[error(
        "date value expected on both sides of the scope resolution operator '::' \
         to signify start and end of range"
    )]
    ExpectedTwoDates,

    #[error("error in parsing start or end date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error(
        "start date '{}' is later than end date '{}'",
        .start.format(UTC_FORMAT),
        .end.format(UTC_FORMAT)
    )]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("invalid argument: {name} must not be empty")]
    InvalidArgument { name: &'static str },

    #[error("could not parse date range '{token}': {reason}")]
    MalformedScope { token: String, reason: ScopeFault },

    #[error(
        "action query failed for job '{job_id}' between {} and {}",
        .start.format(UTC_FORMAT),
        .end.format(UTC_FORMAT)
    )]
    QueryFailure {
        job_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("not initialized: run 'coordlog init'")]
    NotInitialized,

    #[error("invalid action status: {0}")]
    InvalidStatus(String),

    #[error("action store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CoordError {
    pub(crate) fn malformed(token: &str, reason: ScopeFault) -> Self {
        CoordError::MalformedScope {
            token: token.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoordError>;
