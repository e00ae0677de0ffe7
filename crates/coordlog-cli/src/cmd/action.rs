use crate::output::{print_actions, print_json};
use anyhow::Context;
use clap::Subcommand;
use coordlog_core::{format_utc, parse_utc, ActionStatus, CoordAction};
use std::path::Path;

#[derive(Subcommand)]
pub enum ActionSubcommand {
    /// Record an action for a coordinator job (replaces an existing one with the same number)
    Add {
        job_id: String,
        /// 1-based action number within the job
        number: u32,
        /// Scheduled time, e.g. 2024-02-01T00:00Z
        #[arg(long)]
        nominal_time: String,
        /// WAITING, READY, SUBMITTED, RUNNING, SUSPENDED, TIMEDOUT, SUCCEEDED, KILLED, FAILED or SKIPPED
        #[arg(long, default_value = "WAITING")]
        status: String,
    },
    /// List every action of a coordinator job
    List { job_id: String },
}

pub fn run(root: &Path, subcmd: ActionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ActionSubcommand::Add {
            job_id,
            number,
            nominal_time,
            status,
        } => add(root, &job_id, number, &nominal_time, &status, json),
        ActionSubcommand::List { job_id } => list(root, &job_id, json),
    }
}

fn add(
    root: &Path,
    job_id: &str,
    number: u32,
    nominal_time: &str,
    status: &str,
    json: bool,
) -> anyhow::Result<()> {
    let nominal_time = parse_utc(nominal_time).with_context(|| {
        format!("invalid nominal time '{nominal_time}' (expected e.g. 2024-02-01T00:00Z)")
    })?;
    let status: ActionStatus = status.parse()?;
    let action = CoordAction::new(job_id, number, nominal_time).with_status(status);

    let db = super::open_store(root)?;
    db.insert(&action).context("failed to save action")?;

    if json {
        print_json(&action)?;
    } else {
        println!(
            "Recorded action [{}] at {} ({})",
            action.id,
            format_utc(action.nominal_time),
            action.status
        );
    }
    Ok(())
}

fn list(root: &Path, job_id: &str, json: bool) -> anyhow::Result<()> {
    let db = super::open_store(root)?;
    let actions = db
        .list_for_job(job_id)
        .with_context(|| format!("failed to list actions for job '{job_id}'"))?;
    print_actions(&actions, json)
}
