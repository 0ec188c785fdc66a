//! Shared fixtures for mr-sweep tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{
    BRANCH_LISTING, MockForgeService, RecordingSink, event_listing, mr_listing,
};

use mr_sweep::types::{Branch, EventAction, MergeRequest, MrState, TimelineEvent};

/// Web URL used for fixture merge requests
pub fn mr_url(iid: u64) -> String {
    format!("https://gitlab.example.com/team/app/-/merge_requests/{iid}")
}

pub fn make_branch(name: &str) -> Branch {
    Branch {
        name: name.to_string(),
    }
}

pub fn make_mr(iid: u64, source: &str, target: &str, state: MrState) -> MergeRequest {
    MergeRequest {
        iid,
        title: format!("Change {iid}"),
        web_url: mr_url(iid),
        source_branch: source.to_string(),
        target_branch: target.to_string(),
        state,
    }
}

pub fn make_merged(iid: u64, source: &str) -> MergeRequest {
    make_mr(iid, source, "main", MrState::Merged)
}

pub fn make_closed(iid: u64, source: &str) -> MergeRequest {
    make_mr(iid, source, "main", MrState::Closed)
}

pub fn make_event(iid: u64, action: EventAction, author: &str) -> TimelineEvent {
    TimelineEvent {
        target_iid: Some(iid),
        action,
        author_username: Some(author.to_string()),
        created_at: None,
    }
}

/// Mock for the baseline scenario: branches {a, b}, merged !1 from `a`
/// into `main`, merged by alice
pub fn baseline_platform() -> MockForgeService {
    let mock = MockForgeService::new();
    mock.set_branches(&["a", "b"]);
    mock.set_merge_requests(vec![make_merged(1, "a")]);
    mock.set_events(vec![make_event(1, EventAction::Merged, "alice")]);
    mock
}
