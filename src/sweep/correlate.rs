//! Correlation - join merge requests to their branches and closing events
//!
//! Pure functions: no I/O, everything comes from a [`ProjectSnapshot`].

use crate::sweep::gather::ProjectSnapshot;
use crate::types::{Branch, MergeRequest, TimelineEvent};
use std::collections::HashMap;
use tracing::debug;

/// A merge request joined with its branches and closing event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedEntry<'a> {
    /// The merge request
    pub merge_request: &'a MergeRequest,
    /// Source branch, which still exists in the repository
    pub source_branch: &'a Branch,
    /// Target branch, if it still exists
    pub target_branch: Option<&'a Branch>,
    /// Most recently seen merge/close event for this MR
    pub event: Option<&'a TimelineEvent>,
}

impl CorrelatedEntry<'_> {
    /// Username of whoever merged or closed the MR, if known.
    ///
    /// `None` both when no event was found and when the event has no author.
    pub fn actor(&self) -> Option<&str> {
        self.event.and_then(|e| e.author_username.as_deref())
    }

    /// Name of the target branch, whether or not it still exists
    pub fn target_name(&self) -> &str {
        self.target_branch
            .map_or(self.merge_request.target_branch.as_str(), |b| b.name.as_str())
    }
}

/// Index branches by name. A later duplicate replaces an earlier one.
pub fn index_branches(branches: &[Branch]) -> HashMap<&str, &Branch> {
    branches.iter().map(|b| (b.name.as_str(), b)).collect()
}

/// Index events by the IID of the MR they target. A later event replaces an
/// earlier one; events without a target IID are ignored.
pub fn index_events(events: &[TimelineEvent]) -> HashMap<u64, &TimelineEvent> {
    events
        .iter()
        .filter_map(|e| e.target_iid.map(|iid| (iid, e)))
        .collect()
}

/// Join every merge request whose source branch still exists.
///
/// MRs whose source branch is gone produce no entry. A missing event is
/// not a reason to drop an entry; it is left for the report to handle.
pub fn correlate(snapshot: &ProjectSnapshot) -> Vec<CorrelatedEntry<'_>> {
    let branches = index_branches(&snapshot.branches);
    let events = index_events(&snapshot.events);

    let entries: Vec<CorrelatedEntry<'_>> = snapshot
        .merge_requests
        .iter()
        .filter_map(|mr| {
            let source_branch = branches.get(mr.source_branch.as_str()).copied()?;
            Some(CorrelatedEntry {
                merge_request: mr,
                source_branch,
                target_branch: branches.get(mr.target_branch.as_str()).copied(),
                event: events.get(&mr.iid).copied(),
            })
        })
        .collect();

    debug!(
        merge_requests = snapshot.merge_requests.len(),
        correlated = entries.len(),
        "correlated merge requests with existing branches"
    );
    entries
}
