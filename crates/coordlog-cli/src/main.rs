mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::action::ActionSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "coordlog",
    about = "Resolve date-range scopes into coordinator actions for log retrieval",
    version,
    propagate_version = true
)]
struct Cli {
    /// Root directory (default: auto-detect from .coordlog/ or .git/)
    #[arg(long, global = true, env = "COORDLOG_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .coordlog/ with a default config and an empty action store
    Init,

    /// Record and list coordinator actions
    Action {
        #[command(subcommand)]
        subcommand: ActionSubcommand,
    },

    /// List a job's actions within one or more date ranges
    ///
    /// SCOPE is a comma-separated list of START::END pairs, each date in
    /// the form 2024-02-01T00:00Z. Both ends are inclusive; actions matched
    /// by overlapping ranges are listed once.
    Scope { job_id: String, scope: String },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Action { subcommand } => cmd::action::run(&root, subcommand, cli.json),
        Commands::Scope { job_id, scope } => cmd::scope::run(&root, &job_id, &scope, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
