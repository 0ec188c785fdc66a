//! Report delivery
//!
//! The sweep hands its rendered report to a [`NotificationSink`] as a single
//! text payload. The only shipped sink posts to a chat webhook.

mod webhook;

pub use webhook::{WebhookMessage, WebhookSink};

use crate::error::Result;
use async_trait::async_trait;

/// Destination for a rendered report
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver the report text
    async fn send(&self, text: &str) -> Result<()>;
}

/// Sink that drops every report
///
/// Stands in for the webhook on dry runs, where nothing is ever sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl NotificationSink for NullSink {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::debug!(bytes = text.len(), "discarding report");
        Ok(())
    }
}
