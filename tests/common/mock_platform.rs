//! Mock forge service and notification sink for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use mr_sweep::error::{Error, Result};
use mr_sweep::notify::NotificationSink;
use mr_sweep::platform::{ForgeService, Page};
use mr_sweep::types::{Branch, EventAction, MergeRequest, MrState, TimelineEvent};
use std::collections::HashMap;
use std::sync::Mutex;

/// Listing key for merge requests in `state`
pub fn mr_listing(state: MrState) -> String {
    format!("merge_requests:{state}")
}

/// Listing key for branches
pub const BRANCH_LISTING: &str = "branches";

/// Listing key for events with `action`
pub fn event_listing(action: EventAction) -> String {
    format!("events:{action}")
}

/// Simple mock forge service for testing
///
/// Manually implements `ForgeService` so that pages, call order and
/// failures are fully under the test's control.
///
/// Features:
/// - Multi-page responses per listing (declares the real page count)
/// - Call tracking as `(listing, page)` pairs, in call order
/// - Error injection on a specific listing and page
#[derive(Default)]
pub struct MockForgeService {
    mr_pages: Mutex<HashMap<MrState, Vec<Vec<MergeRequest>>>>,
    branch_pages: Mutex<Vec<Vec<Branch>>>,
    event_pages: Mutex<HashMap<EventAction, Vec<Vec<TimelineEvent>>>>,
    calls: Mutex<Vec<(String, u32)>>,
    failure: Mutex<Option<(String, u32, String)>>,
}

impl MockForgeService {
    /// Mock with every listing empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` for merge requests in `state`
    pub fn set_merge_request_pages(&self, state: MrState, pages: Vec<Vec<MergeRequest>>) {
        self.mr_pages.lock().unwrap().insert(state, pages);
    }

    /// Serve `mrs` as a single page; the state is taken from each MR
    pub fn set_merge_requests(&self, mrs: Vec<MergeRequest>) {
        let mut by_state: HashMap<MrState, Vec<MergeRequest>> = HashMap::new();
        for mr in mrs {
            by_state.entry(mr.state).or_default().push(mr);
        }
        for (state, items) in by_state {
            self.set_merge_request_pages(state, vec![items]);
        }
    }

    /// Serve `pages` for branches
    pub fn set_branch_pages(&self, pages: Vec<Vec<Branch>>) {
        *self.branch_pages.lock().unwrap() = pages;
    }

    /// Serve branches with these names as a single page
    pub fn set_branches(&self, names: &[&str]) {
        self.set_branch_pages(vec![names.iter().map(|n| crate::common::make_branch(n)).collect()]);
    }

    /// Serve `pages` for events with `action`
    pub fn set_event_pages(&self, action: EventAction, pages: Vec<Vec<TimelineEvent>>) {
        self.event_pages.lock().unwrap().insert(action, pages);
    }

    /// Serve `events` as a single page; the action is taken from each event
    pub fn set_events(&self, events: Vec<TimelineEvent>) {
        let mut by_action: HashMap<EventAction, Vec<TimelineEvent>> = HashMap::new();
        for event in events {
            by_action.entry(event.action).or_default().push(event);
        }
        for (action, items) in by_action {
            self.set_event_pages(action, vec![items]);
        }
    }

    /// Make `listing` fail when `page` is requested
    pub fn fail_on(&self, listing: &str, page: u32, msg: &str) {
        *self.failure.lock().unwrap() = Some((listing.to_string(), page, msg.to_string()));
    }

    /// Every `(listing, page)` requested so far
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests made for `listing`
    pub fn call_count(&self, listing: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == listing)
            .count()
    }

    fn serve<T: Clone>(&self, listing: String, page: u32, pages: &[Vec<T>]) -> Result<Page<T>> {
        self.calls.lock().unwrap().push((listing.clone(), page));

        if let Some((fail_listing, fail_page, msg)) = self.failure.lock().unwrap().as_ref() {
            if *fail_listing == listing && *fail_page == page {
                return Err(Error::GitLabApi(msg.clone()));
            }
        }

        let items = usize::try_from(page)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .and_then(|i| pages.get(i))
            .cloned()
            .unwrap_or_default();
        let total = u32::try_from(pages.len().max(1)).unwrap();
        Ok(Page::new(items, Some(total)))
    }
}

#[async_trait]
impl ForgeService for MockForgeService {
    async fn list_merge_requests(&self, state: MrState, page: u32) -> Result<Page<MergeRequest>> {
        let pages = self.mr_pages.lock().unwrap().get(&state).cloned().unwrap_or_default();
        self.serve(mr_listing(state), page, &pages)
    }

    async fn list_branches(&self, page: u32) -> Result<Page<Branch>> {
        let pages = self.branch_pages.lock().unwrap().clone();
        self.serve(BRANCH_LISTING.to_string(), page, &pages)
    }

    async fn list_events(&self, action: EventAction, page: u32) -> Result<Page<TimelineEvent>> {
        let pages = self.event_pages.lock().unwrap().get(&action).cloned().unwrap_or_default();
        self.serve(event_listing(action), page, &pages)
    }
}

/// Notification sink that records every payload
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
    error: Mutex<Option<String>>,
}

impl RecordingSink {
    /// Sink that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `send` fail
    pub fn fail_send(&self, msg: &str) {
        *self.error.lock().unwrap() = Some(msg.to_string());
    }

    /// Payloads received so far
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, text: &str) -> Result<()> {
        if let Some(msg) = self.error.lock().unwrap().as_ref() {
            return Err(Error::Notify(msg.clone()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
