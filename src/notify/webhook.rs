//! Incoming-webhook sink (Mattermost/Slack compatible)

use crate::error::{Error, Result};
use crate::notify::NotificationSink;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// JSON body accepted by incoming webhooks
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    /// Full report text
    pub text: &'a str,
}

/// Posts reports to an incoming webhook
pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl WebhookSink {
    /// Create a sink for the given webhook URL
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Notify(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(&self, text: &str) -> Result<()> {
        debug!(url = %self.url, bytes = text.len(), "posting report to webhook");

        self.client
            .post(self.url.clone())
            .json(&WebhookMessage { text })
            .send()
            .await
            .map_err(|e| Error::Notify(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Notify(e.to_string()))?;

        debug!("webhook accepted report");
        Ok(())
    }
}
