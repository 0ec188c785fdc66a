//! mr-sweep: find source branches left behind by merged GitLab merge requests
//!
//! The library pulls merge requests, branches and merge/close events for a
//! project, joins them, and renders a reminder listing every merged MR whose
//! source branch still exists. The binary wraps this in a CLI with an optional
//! recurring schedule.

pub mod config;
pub mod error;
pub mod notify;
pub mod platform;
pub mod schedule;
pub mod sweep;
pub mod types;
