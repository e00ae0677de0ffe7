use anyhow::Context;
use coordlog_core::{config::Config, io, paths, ActionDb};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing coordlog in: {}", root.display());

    let dir = paths::coordlog_dir(root);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let config = Config::default();
    let data = serde_yaml::to_string(&config)?;
    if io::write_if_missing(&paths::config_path(root), data.as_bytes())
        .context("failed to write config.yaml")?
    {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    // The configured store may differ from the default when config.yaml already existed.
    let config = Config::load(root).context("failed to load config")?;
    let db_path = config.db_path(root);
    ActionDb::open(&db_path)
        .with_context(|| format!("failed to create action store at {}", db_path.display()))?;
    println!("  store:   {}", db_path.display());

    Ok(())
}
