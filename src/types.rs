//! Core types for mr-sweep

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository branch as listed by the hosting API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (unique within a project)
    pub name: String,
}

/// Merge request state as reported by GitLab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MrState {
    /// Open for review
    Opened,
    /// Closed without merging
    Closed,
    /// Locked (transitional state during merge)
    Locked,
    /// Merged into its target branch
    Merged,
    /// Any state this tool does not know about
    #[serde(other)]
    Other,
}

impl MrState {
    /// Value used for the `state` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Locked => "locked",
            Self::Merged => "merged",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for MrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merge request (review request) snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeRequest {
    /// Project-scoped MR number
    pub iid: u64,
    /// MR title
    #[serde(default)]
    pub title: String,
    /// Web URL for the MR
    pub web_url: String,
    /// Branch the changes come from
    pub source_branch: String,
    /// Branch the changes were proposed against
    pub target_branch: String,
    /// Current state
    pub state: MrState,
}

/// Action recorded by a timeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// The MR was merged
    Merged,
    /// The MR was closed
    Closed,
}

impl EventAction {
    /// Value used for the `action` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merge or close event performed by someone against an MR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEvent {
    /// IID of the MR the event refers to (absent for non-MR targets)
    pub target_iid: Option<u64>,
    /// What happened
    pub action: EventAction,
    /// Username of the actor, when GitLab reports one
    pub author_username: Option<String>,
    /// When it happened
    pub created_at: Option<DateTime<Utc>>,
}
