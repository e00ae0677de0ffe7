pub mod action;
pub mod init;
pub mod scope;

use anyhow::Context;
use coordlog_core::{config::Config, ActionDb};
use std::path::Path;

/// Open the action store configured for `root`.
pub fn open_store(root: &Path) -> anyhow::Result<ActionDb> {
    let config = Config::load(root).context("failed to load config")?;
    let db_path = config.db_path(root);
    ActionDb::open(&db_path)
        .with_context(|| format!("failed to open action store at {}", db_path.display()))
}
