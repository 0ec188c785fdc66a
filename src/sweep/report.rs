//! Report building - pure rendering of the reminder text

use crate::error::{Error, Result};
use crate::sweep::correlate::CorrelatedEntry;
use crate::types::MrState;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Actor rendered when no merge/close event author was found
pub const UNKNOWN_ACTOR: &str = "unknown";

/// What to do with a merged MR whose merge/close event or its author is missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingActorPolicy {
    /// Render the entry with [`UNKNOWN_ACTOR`]
    #[default]
    Placeholder,
    /// Leave the entry out of the report
    Skip,
    /// Fail the whole run
    Fail,
}

impl std::fmt::Display for MissingActorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placeholder => write!(f, "placeholder"),
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Rendered reminder for one sweep run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// One line per merged MR, in snapshot order
    pub lines: Vec<String>,
    /// Number of merged MRs listed
    pub merged_count: usize,
    /// Closed (not merged) MRs that still have their source branch
    pub closed_count: usize,
}

impl Report {
    /// Summary line
    pub fn header(&self) -> String {
        format!("Hi, there are {} branch(es) to remove!", self.merged_count)
    }

    /// Full text: header followed by every entry line
    pub fn text(&self) -> String {
        let mut text = self.header();
        for line in &self.lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

/// Render the reminder line for one entry
pub fn render_line(entry: &CorrelatedEntry<'_>, actor: &str) -> String {
    let mr = entry.merge_request;
    format!(
        "MR **[!{}]({})** was **{}** by @{} in **{}** and source branch **{}** still exists, please remove it.",
        mr.iid,
        mr.web_url,
        mr.state,
        actor,
        entry.target_name(),
        entry.source_branch.name
    )
}

/// Build the report from filtered entries.
///
/// Only merged MRs are listed; closed ones are counted for context.
/// Returns `Ok(None)` when there is nothing to list.
pub fn build_report(
    entries: &[CorrelatedEntry<'_>],
    policy: MissingActorPolicy,
) -> Result<Option<Report>> {
    let closed_count = entries
        .iter()
        .filter(|e| e.merge_request.state == MrState::Closed)
        .count();

    let mut lines = Vec::new();
    for entry in entries
        .iter()
        .filter(|e| e.merge_request.state == MrState::Merged)
    {
        let actor = match (entry.actor(), policy) {
            (Some(actor), _) => actor,
            (None, MissingActorPolicy::Placeholder) => {
                warn!(
                    mr_iid = entry.merge_request.iid,
                    "no merge event author found, actor unknown"
                );
                UNKNOWN_ACTOR
            }
            (None, MissingActorPolicy::Skip) => {
                warn!(
                    mr_iid = entry.merge_request.iid,
                    "no merge event author found, skipping"
                );
                continue;
            }
            (None, MissingActorPolicy::Fail) => {
                return Err(Error::MissingEvent(entry.merge_request.iid));
            }
        };
        lines.push(render_line(entry, actor));
    }

    if lines.is_empty() {
        return Ok(None);
    }

    Ok(Some(Report {
        merged_count: lines.len(),
        lines,
        closed_count,
    }))
}
