//! Stale-branches command - remind about branches of merged MRs

use crate::cli::style::{Stylize, check};
use crate::cli::{Cli, StaleBranchesArgs};
use anstream::println;
use mr_sweep::config::{ConfigFile, Overrides, SweepConfig};
use mr_sweep::error::Result;
use mr_sweep::notify::{NotificationSink, NullSink, WebhookSink};
use mr_sweep::platform::GitLabService;
use mr_sweep::schedule::{Period, run_scheduled};
use mr_sweep::sweep::{Report, SweepOptions, SweepOutcome, run_sweep};
use tracing::info;

/// Run the stale-branches command, once or on a schedule
pub async fn run_stale_branches(cli: &Cli, args: &StaleBranchesArgs) -> Result<()> {
    let period = Period::parse(&cli.period)?;
    let file = ConfigFile::discover(cli.config.as_deref())?;
    let config = SweepConfig::resolve(file, overrides(cli, args))?;

    info!(
        gitlab = %config.gitlab_uri,
        project = %config.project_id,
        excluded = config.exclude.len(),
        dry_run = config.dry_run,
        "checking merge request branches"
    );

    let platform = GitLabService::new(
        &config.gitlab_uri,
        config.token.clone(),
        config.project_id.clone(),
        config.timeout,
    )?;
    let sink: Box<dyn NotificationSink> = match &config.webhook_uri {
        Some(url) => Box::new(WebhookSink::new(url.clone(), config.timeout)?),
        None => Box::new(NullSink),
    };
    let options = config.sweep_options();

    let platform = &platform;
    let sink = sink.as_ref();
    let options = &options;
    run_scheduled(cli.cron, period, || async move {
        let outcome = run_sweep(platform, sink, options).await?;
        print_outcome(&outcome, options);
        Ok(())
    })
    .await
}

fn overrides(cli: &Cli, args: &StaleBranchesArgs) -> Overrides {
    Overrides {
        gitlab_uri: args.gitlab_uri.clone(),
        token: args.token.clone(),
        project_id: args.project_id.clone(),
        webhook_uri: args.webhook_uri.clone(),
        exclude: args.exclude.clone(),
        dry_run: cli.dry_run,
        missing_actor: args.on_missing_actor,
        timeout_secs: args.timeout_secs,
    }
}

fn print_outcome(outcome: &SweepOutcome, options: &SweepOptions) {
    match outcome {
        SweepOutcome::NothingToReport => {
            println!("{}", "No branches to remove".muted());
        }
        SweepOutcome::DryRun(report) => {
            print_report(report);
            println!();
            println!("{}", "Dry run: report not sent".muted());
        }
        SweepOutcome::Delivered(report) => {
            println!(
                "{} Reminder sent for {} branch(es)",
                check(),
                report.merged_count.accent()
            );
            if !options.exclude.is_empty() {
                println!(
                    "{}",
                    format!("{} branch name(s) excluded", options.exclude.len()).muted()
                );
            }
        }
    }
}

fn print_report(report: &Report) {
    println!("{}", report.header().emphasis());
    for line in &report.lines {
        println!("  {line}");
    }
    if report.closed_count > 0 {
        println!(
            "{}",
            format!(
                "{} closed merge request(s) also still have their source branch",
                report.closed_count
            )
            .warn()
        );
    }
}
