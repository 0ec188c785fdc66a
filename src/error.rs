//! Error types for mr-sweep

use thiserror::Error;

/// Errors produced while fetching, reconciling or delivering a report
#[derive(Debug, Error)]
pub enum Error {
    /// The GitLab API answered with a non-success status
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// The total-pages metadata could not be parsed
    #[error("invalid pagination metadata: {0}")]
    Pagination(String),

    /// A listing failed; wraps the underlying error with the resource name
    #[error("failed to fetch {resource}: {source}")]
    Fetch {
        /// Human-readable name of the listing (e.g. "merged merge requests")
        resource: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The notification sink rejected or never received the report
    #[error("notification delivery failed: {0}")]
    Notify(String),

    /// A merged MR has no closing event and the policy forbids rendering it
    #[error("merge request !{0} has no merge/close event author to attribute it to")]
    MissingEvent(u64),

    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid schedule expression
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Wrap this error with the name of the listing that produced it
    #[must_use]
    pub fn fetching(self, resource: impl Into<String>) -> Self {
        Self::Fetch {
            resource: resource.into(),
            source: Box::new(self),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
