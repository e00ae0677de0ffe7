//! Persistent storage for coordinator actions using redb.
//!
//! # Table design
//!
//! A single `COORD_ACTIONS` table uses a variable-length composite key:
//! ```text
//! [ job_id: utf-8 | 0x00 | secs: i64 sign-flipped BE (8) | nanos: u32 BE (4) | action_number: u32 BE (4) ]
//! ```
//!
//! The NUL byte terminates the job id, and flipping the sign bit makes the
//! seconds bytes order like the signed value. Keeping full nanosecond
//! precision means the inclusive upper bound never admits a later action.
//! Byte ordering therefore equals `(job_id, nominal_time, action_number)`
//! ordering, and an inclusive date-range lookup for one job is a single range
//! scan with no post-filtering.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::action::CoordAction;
use crate::aggregate::ActionQuery;
use crate::error::{CoordError, Result};

// ---------------------------------------------------------------------------
// Table definition
// ---------------------------------------------------------------------------

/// Key: composite (job_id ++ 0x00 ++ secs ++ nanos ++ action_number)
/// Value: JSON-encoded CoordAction
const COORD_ACTIONS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("coord_actions");

const JOB_TERMINATOR: u8 = 0x00;

// ---------------------------------------------------------------------------
// Key helpers
// ---------------------------------------------------------------------------

fn ts_bytes(ts: DateTime<Utc>) -> [u8; 12] {
    let mut out = [0u8; 12];
    out[..8].copy_from_slice(&((ts.timestamp() as u64) ^ (1 << 63)).to_be_bytes());
    out[8..].copy_from_slice(&ts.timestamp_subsec_nanos().to_be_bytes());
    out
}

fn job_prefix(job_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(job_id.len() + 17);
    key.extend_from_slice(job_id.as_bytes());
    key.push(JOB_TERMINATOR);
    key
}

fn action_key(job_id: &str, nominal_time: DateTime<Utc>, action_number: u32) -> Vec<u8> {
    let mut key = job_prefix(job_id);
    key.extend_from_slice(&ts_bytes(nominal_time));
    key.extend_from_slice(&action_number.to_be_bytes());
    key
}

/// Inclusive bounds covering every action of `job_id` in `[start, end]`.
fn range_bounds(job_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> (Vec<u8>, Vec<u8>) {
    (action_key(job_id, start, 0), action_key(job_id, end, u32::MAX))
}

/// Half-open bounds covering every action of `job_id`.
fn job_bounds(job_id: &str) -> (Vec<u8>, Vec<u8>) {
    let lower = job_prefix(job_id);
    let mut upper = lower.clone();
    if let Some(last) = upper.last_mut() {
        *last = JOB_TERMINATOR + 1;
    }
    (lower, upper)
}

fn key_action_number(key: &[u8]) -> Option<u32> {
    let tail: [u8; 4] = key.get(key.len().checked_sub(4)?..)?.try_into().ok()?;
    Some(u32::from_be_bytes(tail))
}

fn store_err(e: impl std::fmt::Display) -> CoordError {
    CoordError::Store(e.to_string())
}

fn check_job_id(job_id: &str) -> Result<()> {
    if job_id.trim().is_empty() {
        return Err(CoordError::InvalidArgument { name: "jobId" });
    }
    if job_id.as_bytes().contains(&JOB_TERMINATOR) {
        return Err(CoordError::Store(format!(
            "job id must not contain NUL: {job_id:?}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ActionDb
// ---------------------------------------------------------------------------

/// Persistent store for `CoordAction` records.
pub struct ActionDb {
    db: Database,
}

impl ActionDb {
    /// Open or create the redb database at `path`.
    ///
    /// Creates the `COORD_ACTIONS` table if it doesn't already exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(store_err)?;
        // Ensure the table exists before any reads
        let wt = db.begin_write().map_err(store_err)?;
        wt.open_table(COORD_ACTIONS).map_err(store_err)?;
        wt.commit().map_err(store_err)?;
        debug!(path = %path.display(), "opened action store");
        Ok(Self { db })
    }

    /// Insert or replace an action.
    ///
    /// Any stored action with the same id is removed first, so moving an
    /// action to a new nominal time never leaves a stale key behind.
    pub fn insert(&self, action: &CoordAction) -> Result<()> {
        check_job_id(&action.job_id)?;
        let key = action_key(&action.job_id, action.nominal_time, action.action_number);
        let value = serde_json::to_vec(action)?;
        let (lower, upper) = job_bounds(&action.job_id);

        let wt = self.db.begin_write().map_err(store_err)?;
        {
            let mut table = wt.open_table(COORD_ACTIONS).map_err(store_err)?;
            let mut stale = Vec::new();
            for entry in table
                .range(lower.as_slice()..upper.as_slice())
                .map_err(store_err)?
            {
                let (k, _) = entry.map_err(store_err)?;
                if key_action_number(k.value()) == Some(action.action_number) {
                    stale.push(k.value().to_vec());
                }
            }
            for k in &stale {
                table.remove(k.as_slice()).map_err(store_err)?;
            }
            table
                .insert(key.as_slice(), value.as_slice())
                .map_err(store_err)?;
        }
        wt.commit().map_err(store_err)?;
        Ok(())
    }

    /// Return the actions of `job_id` whose nominal time is within
    /// `[start, end]`, in nominal-time order.
    pub fn range_for_job(
        &self,
        job_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CoordAction>> {
        check_job_id(job_id)?;
        if start > end {
            return Ok(Vec::new());
        }
        let (lower, upper) = range_bounds(job_id, start, end);
        self.scan(lower.as_slice()..=upper.as_slice())
    }

    /// List every action of `job_id`, in nominal-time order.
    pub fn list_for_job(&self, job_id: &str) -> Result<Vec<CoordAction>> {
        check_job_id(job_id)?;
        let (lower, upper) = job_bounds(job_id);
        self.scan(lower.as_slice()..upper.as_slice())
    }

    fn scan<'a>(&self, range: impl std::ops::RangeBounds<&'a [u8]> + 'a) -> Result<Vec<CoordAction>> {
        let rt = self.db.begin_read().map_err(store_err)?;
        let table = rt.open_table(COORD_ACTIONS).map_err(store_err)?;

        let mut result = Vec::new();
        for entry in table.range(range).map_err(store_err)? {
            let (_, v) = entry.map_err(store_err)?;
            let action: CoordAction = serde_json::from_slice(v.value())?;
            result.push(action);
        }
        Ok(result)
    }
}

impl ActionQuery for ActionDb {
    type Record = CoordAction;
    type Error = CoordError;

    fn actions_for_date_range(
        &self,
        job_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CoordAction>> {
        self.range_for_job(job_id, start, end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
