use std::path::{Path, PathBuf};

pub const COORDLOG_DIR: &str = ".coordlog";
pub const CONFIG_FILE: &str = ".coordlog/config.yaml";
pub const DEFAULT_DB_FILE: &str = ".coordlog/actions.db";

pub fn coordlog_dir(root: &Path) -> PathBuf {
    root.join(COORDLOG_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
