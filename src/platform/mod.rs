//! Hosting platform access
//!
//! Provides the listing operations the sweep needs, one page at a time,
//! plus the generic driver that drains every page of a listing.

mod gitlab;
mod pagination;

pub use gitlab::{DEFAULT_TIMEOUT_SECS, GitLabService, PER_PAGE};
pub use pagination::{Page, fetch_all_pages, parse_total_pages};

use crate::error::Result;
use crate::types::{Branch, EventAction, MergeRequest, MrState, TimelineEvent};
use async_trait::async_trait;

/// Paginated listing operations against a hosted project
///
/// Each call returns exactly one page; draining is left to
/// [`fetch_all_pages`] so that every listing paginates the same way.
#[async_trait]
pub trait ForgeService: Send + Sync {
    /// List merge requests in the given state
    async fn list_merge_requests(&self, state: MrState, page: u32) -> Result<Page<MergeRequest>>;

    /// List the project's branches
    async fn list_branches(&self, page: u32) -> Result<Page<Branch>>;

    /// List merge request events with the given action
    async fn list_events(&self, action: EventAction, page: u32) -> Result<Page<TimelineEvent>>;
}
