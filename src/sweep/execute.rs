//! Sweep execution - gather, reconcile, deliver

use crate::error::Result;
use crate::notify::NotificationSink;
use crate::platform::ForgeService;
use crate::sweep::correlate::correlate;
use crate::sweep::filter::{ExclusionSet, filter_excluded};
use crate::sweep::gather::gather_snapshot;
use crate::sweep::report::{MissingActorPolicy, Report, build_report};
use tracing::info;

/// Options for one sweep run
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Source branches never reported
    pub exclude: ExclusionSet,
    /// Compute and log the report without sending it
    pub dry_run: bool,
    /// Handling of merged MRs without a merge event
    pub missing_actor: MissingActorPolicy,
}

/// How a sweep run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// No merged MR still has its source branch
    NothingToReport,
    /// Report computed but not sent
    DryRun(Report),
    /// Report handed to the sink
    Delivered(Report),
}

impl SweepOutcome {
    /// The computed report, if any
    pub const fn report(&self) -> Option<&Report> {
        match self {
            Self::NothingToReport => None,
            Self::DryRun(report) | Self::Delivered(report) => Some(report),
        }
    }
}

/// Run one sweep (EFFECTFUL)
///
/// Fetches everything from `platform`, joins and filters it, and sends the
/// report to `sink` unless this is a dry run or there is nothing to report.
/// Any fetch or delivery failure fails the run; no partial report is sent.
pub async fn run_sweep(
    platform: &dyn ForgeService,
    sink: &dyn NotificationSink,
    options: &SweepOptions,
) -> Result<SweepOutcome> {
    let snapshot = gather_snapshot(platform).await?;

    let entries = filter_excluded(correlate(&snapshot), &options.exclude);
    let Some(report) = build_report(&entries, options.missing_actor)? else {
        info!("no branches to remove");
        return Ok(SweepOutcome::NothingToReport);
    };

    let text = report.text();
    if options.dry_run {
        info!(
            merged = report.merged_count,
            closed = report.closed_count,
            "dry run, report not sent:\n{text}"
        );
        return Ok(SweepOutcome::DryRun(report));
    }

    sink.send(&text).await?;
    info!(merged = report.merged_count, closed = report.closed_count, "report sent");
    Ok(SweepOutcome::Delivered(report))
}
