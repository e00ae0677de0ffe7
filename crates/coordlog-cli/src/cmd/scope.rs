use crate::output::print_actions;
use coordlog_core::{collect_actions, parse_scope};
use std::path::Path;
use tracing::info;

/// Print the actions of `job_id` whose nominal time falls in any range of `scope`.
pub fn run(root: &Path, job_id: &str, scope: &str, json: bool) -> anyhow::Result<()> {
    // Input errors take precedence over store errors.
    let ranges = parse_scope(job_id, scope)?;
    let db = super::open_store(root)?;
    let mut actions = collect_actions(&db, job_id, &ranges)?;
    info!(job_id, scope, count = actions.len(), "resolved scope");

    // Lookup order is unspecified; sort for stable display.
    actions.sort_by(|a, b| {
        a.nominal_time
            .cmp(&b.nominal_time)
            .then(a.action_number.cmp(&b.action_number))
    });
    print_actions(&actions, json)
}
