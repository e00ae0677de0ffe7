//! Merge per-range query results into one deduplicated action list.
//!
//! Each `DateRange` is looked up through an [`ActionQuery`] in parse order.
//! Results are merged into a set keyed by record identity, so ranges that
//! overlap never yield the same action twice. Output order is unspecified.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CoordError, Result};
use crate::scope::{format_utc, DateRange};

/// A record with a stable identity, independent of its other fields.
pub trait Identified {
    type Id: Eq + Hash + Clone;

    fn identity(&self) -> Self::Id;
}

/// Inclusive date-range lookup of a job's actions.
pub trait ActionQuery {
    type Record: Identified;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Actions of `job_id` scheduled within `[start, end]`.
    fn actions_for_date_range(
        &self,
        job_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<Self::Record>, Self::Error>;
}

impl<T: ActionQuery + ?Sized> ActionQuery for &T {
    type Record = T::Record;
    type Error = T::Error;

    fn actions_for_date_range(
        &self,
        job_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<Self::Record>, Self::Error> {
        (**self).actions_for_date_range(job_id, start, end)
    }
}

/// Query every range and return the union of the results by identity.
///
/// The first failing range aborts the whole collection with `QueryFailure`.
pub fn collect_actions<Q: ActionQuery>(
    query: &Q,
    job_id: &str,
    ranges: &[DateRange],
) -> Result<Vec<Q::Record>> {
    let mut set: HashMap<<Q::Record as Identified>::Id, Q::Record> = HashMap::new();

    for range in ranges {
        let records = query
            .actions_for_date_range(job_id, range.start(), range.end())
            .map_err(|e| CoordError::QueryFailure {
                job_id: job_id.to_string(),
                start: range.start(),
                end: range.end(),
                source: Box::new(e),
            })?;

        let returned = records.len();
        let mut added = 0usize;
        for record in records {
            if let Entry::Vacant(slot) = set.entry(record.identity()) {
                slot.insert(record);
                added += 1;
            }
        }
        debug!(
            job_id,
            start = %format_utc(range.start()),
            end = %format_utc(range.end()),
            returned,
            added,
            "collected actions for range"
        );
    }

    Ok(set.into_values().collect())
}
