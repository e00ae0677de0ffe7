//! Coordinator action data model.
//!
//! A `CoordAction` is one materialized run of a coordinator job at a given
//! nominal time. Its identity is `{job_id}@{action_number}`; every other field
//! may change between reads of the same action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::Identified;
use crate::error::{CoordError, Result};

// ---------------------------------------------------------------------------
// ActionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Waiting,
    Ready,
    Submitted,
    Running,
    Suspended,
    Timedout,
    Succeeded,
    Killed,
    Failed,
    Skipped,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Waiting => "WAITING",
            ActionStatus::Ready => "READY",
            ActionStatus::Submitted => "SUBMITTED",
            ActionStatus::Running => "RUNNING",
            ActionStatus::Suspended => "SUSPENDED",
            ActionStatus::Timedout => "TIMEDOUT",
            ActionStatus::Succeeded => "SUCCEEDED",
            ActionStatus::Killed => "KILLED",
            ActionStatus::Failed => "FAILED",
            ActionStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "WAITING" => Ok(ActionStatus::Waiting),
            "READY" => Ok(ActionStatus::Ready),
            "SUBMITTED" => Ok(ActionStatus::Submitted),
            "RUNNING" => Ok(ActionStatus::Running),
            "SUSPENDED" => Ok(ActionStatus::Suspended),
            "TIMEDOUT" => Ok(ActionStatus::Timedout),
            "SUCCEEDED" => Ok(ActionStatus::Succeeded),
            "KILLED" => Ok(ActionStatus::Killed),
            "FAILED" => Ok(ActionStatus::Failed),
            "SKIPPED" => Ok(ActionStatus::Skipped),
            _ => Err(CoordError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CoordAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordAction {
    /// `{job_id}@{action_number}`.
    pub id: String,
    pub job_id: String,
    pub action_number: u32,
    /// Scheduled time; date-range lookups match against this.
    pub nominal_time: DateTime<Utc>,
    pub status: ActionStatus,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl CoordAction {
    /// Create a new action in `Waiting` state.
    pub fn new(job_id: impl Into<String>, action_number: u32, nominal_time: DateTime<Utc>) -> Self {
        let job_id = job_id.into();
        let now = Utc::now();
        Self {
            id: action_id(&job_id, action_number),
            job_id,
            action_number,
            nominal_time,
            status: ActionStatus::Waiting,
            created_at: now,
            last_modified: now,
        }
    }

    pub fn with_status(mut self, status: ActionStatus) -> Self {
        self.status = status;
        self
    }
}

impl Identified for CoordAction {
    type Id = String;

    fn identity(&self) -> String {
        self.id.clone()
    }
}

pub fn action_id(job_id: &str, action_number: u32) -> String {
    format!("{job_id}@{action_number}")
}
