//! Gather phase - drain the listings the sweep correlates

use crate::error::Result;
use crate::platform::{ForgeService, fetch_all_pages};
use crate::types::{Branch, EventAction, MergeRequest, MrState, TimelineEvent};
use tracing::info;

/// Everything fetched for one sweep run
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    /// Merged MRs followed by closed MRs
    pub merge_requests: Vec<MergeRequest>,
    /// Every branch currently in the repository
    pub branches: Vec<Branch>,
    /// Merge events followed by close events
    pub events: Vec<TimelineEvent>,
}

/// Fetch every merge request in `state`
pub async fn fetch_merge_requests(
    platform: &dyn ForgeService,
    state: MrState,
) -> Result<Vec<MergeRequest>> {
    fetch_all_pages(|page| platform.list_merge_requests(state, page))
        .await
        .map_err(|e| e.fetching(format!("{state} merge requests")))
}

/// Fetch every branch of the project
pub async fn fetch_branches(platform: &dyn ForgeService) -> Result<Vec<Branch>> {
    fetch_all_pages(|page| platform.list_branches(page))
        .await
        .map_err(|e| e.fetching("branches"))
}

/// Fetch every merge request event with `action`
pub async fn fetch_events(
    platform: &dyn ForgeService,
    action: EventAction,
) -> Result<Vec<TimelineEvent>> {
    fetch_all_pages(|page| platform.list_events(action, page))
        .await
        .map_err(|e| e.fetching(format!("{action} events")))
}

/// Fetch merged and closed MRs, branches, and merge/close events.
///
/// Listings run one after another; the first failure aborts the gather.
pub async fn gather_snapshot(platform: &dyn ForgeService) -> Result<ProjectSnapshot> {
    let mut merge_requests = fetch_merge_requests(platform, MrState::Merged).await?;
    merge_requests.extend(fetch_merge_requests(platform, MrState::Closed).await?);
    info!(count = merge_requests.len(), "found merge requests closed or merged");

    let branches = fetch_branches(platform).await?;
    info!(count = branches.len(), "found branches");

    let mut events = fetch_events(platform, EventAction::Merged).await?;
    events.extend(fetch_events(platform, EventAction::Closed).await?);
    info!(count = events.len(), "found merge/close events");

    Ok(ProjectSnapshot {
        merge_requests,
        branches,
        events,
    })
}
