//! Branch exclusion

use crate::sweep::correlate::CorrelatedEntry;
use std::collections::HashSet;
use tracing::info;

/// Source branch names that are never reported
///
/// Matching is exact: no trimming, no case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Empty set; excludes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `branch` is excluded
    pub fn contains(&self, branch: &str) -> bool {
        self.names.contains(branch)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are excluded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Drop entries whose source branch is excluded, keeping order
pub fn filter_excluded<'a>(
    entries: Vec<CorrelatedEntry<'a>>,
    exclude: &ExclusionSet,
) -> Vec<CorrelatedEntry<'a>> {
    let before = entries.len();
    let kept: Vec<CorrelatedEntry<'a>> = entries
        .into_iter()
        .filter(|entry| !exclude.contains(&entry.source_branch.name))
        .collect();

    info!(
        count = kept.len(),
        excluded = before - kept.len(),
        "found merge requests with existing branches"
    );
    kept
}
