//! Command line interface

mod stale_branches;
pub mod style;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use mr_sweep::error::Result;
use mr_sweep::sweep::MissingActorPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Remind people to delete the branches of merged GitLab merge requests
#[derive(Debug, Parser)]
#[command(name = "mr-sweep", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/mr-sweep/config.toml when present)
    #[arg(long, global = true, env = "MR_SWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Compute the report but do not send it (`--dry-run=false` overrides the config file)
    #[arg(
        long,
        global = true,
        env = "MR_SWEEP_DRY_RUN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: Option<bool>,

    /// Keep running and repeat the task every --period
    #[arg(
        long,
        global = true,
        env = "MR_SWEEP_CRON",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub cron: bool,

    /// Period between runs: @hourly, @daily, @weekly or "@every 1h30m"
    #[arg(long, global = true, env = "MR_SWEEP_PERIOD", default_value = "@daily")]
    pub period: String,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available tasks
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report merged merge requests whose source branch still exists
    StaleBranches(StaleBranchesArgs),
}

/// Arguments for `stale-branches`
#[derive(Debug, Args)]
pub struct StaleBranchesArgs {
    /// GitLab instance root URI [default: https://gitlab.com]
    #[arg(long, env = "MR_SWEEP_GITLAB_URI")]
    pub gitlab_uri: Option<String>,

    /// GitLab access token
    #[arg(long, env = "MR_SWEEP_GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Project id or group/project path
    #[arg(long, env = "MR_SWEEP_GITLAB_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Incoming webhook receiving the report
    #[arg(long, env = "MR_SWEEP_WEBHOOK_URI")]
    pub webhook_uri: Option<String>,

    /// Source branches never reported (comma-separated, repeatable)
    #[arg(long, env = "MR_SWEEP_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// What to do with merged MRs that have no merge event
    #[arg(long, env = "MR_SWEEP_ON_MISSING_ACTOR", value_enum)]
    pub on_missing_actor: Option<MissingActorPolicy>,

    /// HTTP timeout in seconds [default: 30]
    #[arg(long, env = "MR_SWEEP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// Install the global tracing subscriber, logging to stderr
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "mr_sweep=info",
        1 => "mr_sweep=debug",
        _ => "mr_sweep=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::StaleBranches(args) => stale_branches::run_stale_branches(&cli, args).await,
    }
}
