//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::ForgeService;
use crate::platform::pagination::{Page, parse_total_pages};
use crate::types::{Branch, EventAction, MergeRequest, MrState, TimelineEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Items requested per page on every listing
pub const PER_PAGE: u32 = 100;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Response header carrying the total page count
const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    base_uri: String,
    project_id: String,
}

#[derive(Deserialize)]
struct EventAuthor {
    username: String,
}

/// Contribution event as returned by `/projects/:id/events`
#[derive(Deserialize)]
struct ContributionEvent {
    target_iid: Option<u64>,
    #[serde(default)]
    author: Option<EventAuthor>,
    #[serde(default)]
    author_username: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl ContributionEvent {
    // The listing is filtered server-side, so the action comes from the query.
    fn into_timeline_event(self, action: EventAction) -> TimelineEvent {
        let present = |name: &String| !name.trim().is_empty();
        let author_username = self
            .author
            .map(|a| a.username)
            .filter(present)
            .or_else(|| self.author_username.filter(present));

        TimelineEvent {
            target_iid: self.target_iid,
            action,
            author_username,
            created_at: self.created_at,
        }
    }
}

impl GitLabService {
    /// Create a new GitLab service
    ///
    /// `base_uri` is the instance root (e.g. `https://gitlab.example.com`);
    /// `project_id` is either the numeric id or the `group/project` path.
    pub fn new(
        base_uri: &Url,
        token: String,
        project_id: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_uri: base_uri.as_str().trim_end_matches('/').to_string(),
            project_id,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/v4/projects/{}{}",
            self.base_uri,
            urlencoding::encode(&self.project_id),
            path
        )
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: u32,
    ) -> Result<Page<T>> {
        let url = self.api_url(path);
        let page_param = page.to_string();
        let per_page = PER_PAGE.to_string();

        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(query)
            .query(&[("page", page_param.as_str()), ("per_page", per_page.as_str())])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?;

        let total_pages = match response.headers().get(TOTAL_PAGES_HEADER) {
            Some(value) => {
                let raw = value
                    .to_str()
                    .map_err(|e| Error::Pagination(format!("total pages header: {e}")))?;
                parse_total_pages(Some(raw))?
            }
            None => None,
        };

        let items: Vec<T> = response.json().await?;
        Ok(Page::new(items, total_pages))
    }
}

#[async_trait]
impl ForgeService for GitLabService {
    async fn list_merge_requests(&self, state: MrState, page: u32) -> Result<Page<MergeRequest>> {
        debug!(%state, page, "listing merge requests");
        self.get_page("/merge_requests", &[("state", state.as_str())], page)
            .await
    }

    async fn list_branches(&self, page: u32) -> Result<Page<Branch>> {
        debug!(page, "listing branches");
        self.get_page("/repository/branches", &[], page).await
    }

    async fn list_events(&self, action: EventAction, page: u32) -> Result<Page<TimelineEvent>> {
        debug!(%action, page, "listing merge request events");
        let raw: Page<ContributionEvent> = self
            .get_page(
                "/events",
                &[("action", action.as_str()), ("target_type", "merge_request")],
                page,
            )
            .await?;

        Ok(Page::new(
            raw.items
                .into_iter()
                .map(|e| e.into_timeline_event(action))
                .collect(),
            raw.total_pages,
        ))
    }
}
