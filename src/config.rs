//! Configuration for sweep runs
//!
//! Values come from three layers, highest precedence first: command line
//! flags (and their `MR_SWEEP_*` environment fallbacks), an optional TOML
//! file, then built-in defaults. Exclusions from the file and the command
//! line are merged rather than replaced.

use crate::error::{Error, Result};
use crate::platform::DEFAULT_TIMEOUT_SECS;
use crate::sweep::{ExclusionSet, MissingActorPolicy, SweepOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// GitLab instance used when none is configured
pub const DEFAULT_GITLAB_URI: &str = "https://gitlab.com";

/// Directory name under the platform config dir
const CONFIG_DIR: &str = "mr-sweep";

/// Filename of the optional config file
const CONFIG_FILE: &str = "config.toml";

/// Project reference as written in the config file: numeric id or path
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProjectRef {
    /// Numeric project id
    Id(u64),
    /// `group/project` path or id given as a string
    Path(String),
}

impl std::fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

/// `[gitlab]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitLabSection {
    /// Instance root URI
    pub uri: Option<String>,
    /// Access token
    pub token: Option<String>,
    /// Project id or path
    pub project_id: Option<ProjectRef>,
    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// `[webhook]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookSection {
    /// Incoming webhook URI
    pub uri: Option<String>,
}

/// `[sweep]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepSection {
    /// Source branches never reported
    pub exclude: Vec<String>,
    /// Dry run unless overridden
    pub dry_run: Option<bool>,
    /// Handling of merged MRs without a merge event
    pub on_missing_actor: Option<MissingActorPolicy>,
}

/// Parsed config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// GitLab connection
    pub gitlab: GitLabSection,
    /// Notification webhook
    pub webhook: WebhookSection,
    /// Sweep behavior
    pub sweep: SweepSection,
}

impl ConfigFile {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Default location: `<config dir>/mr-sweep/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the explicit file, or the default one if it exists.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Instance root URI
    pub gitlab_uri: Option<String>,
    /// Access token
    pub token: Option<String>,
    /// Project id or path
    pub project_id: Option<String>,
    /// Incoming webhook URI
    pub webhook_uri: Option<String>,
    /// Additional excluded source branches
    pub exclude: Vec<String>,
    /// Dry run on or off, replacing the file's setting when given
    pub dry_run: Option<bool>,
    /// Handling of merged MRs without a merge event
    pub missing_actor: Option<MissingActorPolicy>,
    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Fully resolved, validated configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Instance root URI
    pub gitlab_uri: Url,
    /// Access token
    pub token: String,
    /// Project id or path
    pub project_id: String,
    /// Webhook URI; only optional on dry runs
    pub webhook_uri: Option<Url>,
    /// Source branches never reported
    pub exclude: ExclusionSet,
    /// Compute but do not send
    pub dry_run: bool,
    /// Handling of merged MRs without a merge event
    pub missing_actor: MissingActorPolicy,
    /// HTTP timeout
    pub timeout: Duration,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_url(what: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("invalid {what} {raw:?}: {e}")))
}

impl SweepConfig {
    /// Merge the layers and validate the result
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
        let gitlab_uri = non_empty(overrides.gitlab_uri)
            .or_else(|| non_empty(file.gitlab.uri))
            .unwrap_or_else(|| DEFAULT_GITLAB_URI.to_string());
        let gitlab_uri = parse_url("GitLab URI", &gitlab_uri)?;

        let token = non_empty(overrides.token)
            .or_else(|| non_empty(file.gitlab.token))
            .ok_or_else(|| Error::Config("a GitLab access token is required".to_string()))?;

        let project_id = non_empty(overrides.project_id)
            .or_else(|| non_empty(file.gitlab.project_id.map(|p| p.to_string())))
            .ok_or_else(|| Error::Config("a GitLab project id is required".to_string()))?;

        let dry_run = overrides
            .dry_run
            .or(file.sweep.dry_run)
            .unwrap_or(false);

        let webhook_uri = non_empty(overrides.webhook_uri)
            .or_else(|| non_empty(file.webhook.uri))
            .map(|raw| parse_url("webhook URI", &raw))
            .transpose()?;
        if webhook_uri.is_none() && !dry_run {
            return Err(Error::Config(
                "a webhook URI is required unless running with --dry-run".to_string(),
            ));
        }

        let exclude = file
            .sweep
            .exclude
            .into_iter()
            .chain(overrides.exclude)
            .collect();

        let missing_actor = overrides
            .missing_actor
            .or(file.sweep.on_missing_actor)
            .unwrap_or_default();

        let timeout_secs = overrides
            .timeout_secs
            .or(file.gitlab.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            gitlab_uri,
            token,
            project_id,
            webhook_uri,
            exclude,
            dry_run,
            missing_actor,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Options for [`crate::sweep::run_sweep`]
    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            exclude: self.exclude.clone(),
            dry_run: self.dry_run,
            missing_actor: self.missing_actor,
        }
    }
}
