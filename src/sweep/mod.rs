//! Stale branch sweep
//!
//! Three-phase pattern:
//! 1. Gather - drain every listing the sweep needs (effectful, sequential)
//! 2. Correlate, filter, report - pure functions over the snapshot
//! 3. Execute - deliver the report, or only log it on a dry run

mod correlate;
mod execute;
mod filter;
mod gather;
mod report;

pub use correlate::{CorrelatedEntry, correlate, index_branches, index_events};
pub use execute::{SweepOptions, SweepOutcome, run_sweep};
pub use filter::{ExclusionSet, filter_excluded};
pub use gather::{
    ProjectSnapshot, fetch_branches, fetch_events, fetch_merge_requests, gather_snapshot,
};
pub use report::{MissingActorPolicy, Report, UNKNOWN_ACTOR, build_report, render_line};
