//! Thin async client for the Slack Web API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::types::{PostMessageRequest, PostMessageResponse};
use super::{MessagePoster, SlackError};
use crate::event::RequestContext;
use crate::Config;

/// Slack Web API client authenticated with a bot access token.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SlackClient {
    /// Create a client around an existing `reqwest::Client`.
    ///
    /// `base_url` is the API host, e.g. `https://slack.com`; method paths
    /// are appended under `/api/`.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(SlackError::Build)?;

        Ok(Self::new(
            http,
            config.slack_api_url.clone(),
            config.access_token.clone(),
        ))
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/api/{}", self.base_url, method)
    }

    async fn send_post_message(&self, request: &PostMessageRequest) -> Result<(), SlackError> {
        debug!(channel = %request.channel, "slack_post_message_sending");

        let response = self
            .http
            .post(self.endpoint("chat.postMessage"))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?;

        let body: PostMessageResponse = response.json().await.map_err(SlackError::Decode)?;

        if !body.ok {
            return Err(SlackError::Api(body.error));
        }

        Ok(())
    }
}

#[async_trait]
impl MessagePoster for SlackClient {
    async fn post_message(
        &self,
        ctx: &RequestContext,
        request: &PostMessageRequest,
    ) -> Result<(), SlackError> {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(SlackError::Cancelled),
            result = self.send_post_message(request) => result,
        }
    }
}

impl fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
