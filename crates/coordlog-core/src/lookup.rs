//! Entry point: resolve a scope string into the actions of a job.

use crate::aggregate::{collect_actions, ActionQuery};
use crate::error::Result;
use crate::scope::parse_scope;

/// Parse `scope` and return the deduplicated actions of `job_id` in it.
///
/// The whole scope is validated before the first query runs, so a malformed
/// token never reaches `query`.
pub fn get_actions_in_date_range<Q: ActionQuery>(
    query: &Q,
    job_id: &str,
    scope: &str,
) -> Result<Vec<Q::Record>> {
    let ranges = parse_scope(job_id, scope)?;
    collect_actions(query, job_id, &ranges)
}
