//! Outbound Slack Web API access.
//!
//! Replies go through the [`MessagePoster`] trait so the bot can be driven
//! against a recording double in tests. [`SlackClient`] is the real
//! implementation.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::RequestContext;

pub use client::SlackClient;
pub use types::{PostMessageRequest, PostMessageResponse};

/// Errors from outbound Slack calls.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("build client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("perform request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Api(String),

    #[error("request cancelled")]
    Cancelled,
}

/// Capability to post a chat message.
#[async_trait]
pub trait MessagePoster: Send + Sync {
    /// Post a message, giving up when `ctx` is cancelled.
    async fn post_message(
        &self,
        ctx: &RequestContext,
        request: &PostMessageRequest,
    ) -> Result<(), SlackError>;
}
