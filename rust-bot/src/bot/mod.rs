//! The ping bot event callback.
//!
//! Answers app mentions: `ping` gets `pong`, `help` gets a usage hint and
//! anything else is told to ask for help. Every other envelope or event
//! type is logged and ignored.

pub mod commands;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::event::{Envelope, EventCallback, RequestContext, APP_MENTION, EVENT_CALLBACK};
use crate::slack::{MessagePoster, PostMessageRequest, SlackError};

pub use commands::{contains_word, Command};

/// Event callback replying to mentions through a [`MessagePoster`].
#[derive(Debug, Clone)]
pub struct PingBot<P> {
    poster: P,
}

impl<P: MessagePoster> PingBot<P> {
    pub fn new(poster: P) -> Self {
        Self { poster }
    }

    pub fn poster(&self) -> &P {
        &self.poster
    }

    async fn handle_event_callback(&self, ctx: &RequestContext, envelope: &Envelope) {
        match envelope.event.kind.as_str() {
            APP_MENTION => self.handle_app_mention(ctx, envelope).await,
            other => info!(event_type = other, "unsupported_event_type"),
        }
    }

    async fn handle_app_mention(&self, ctx: &RequestContext, envelope: &Envelope) {
        let event = &envelope.event;
        let command = Command::parse(&event.text);

        info!(
            user = %event.user,
            channel = %event.channel,
            command = command.as_str(),
            "app_mention_received"
        );

        let request = PostMessageRequest {
            channel: event.channel.clone(),
            text: command.reply(&event.user),
        };

        match self.poster.post_message(ctx, &request).await {
            Ok(()) => info!(channel = %request.channel, "reply_posted"),
            Err(SlackError::Api(reason)) => {
                warn!(channel = %request.channel, error = %reason, "post_message_rejected")
            }
            Err(e) => error!(channel = %request.channel, error = %e, "post_message_failed"),
        }
    }
}

#[async_trait]
impl<P: MessagePoster> EventCallback for PingBot<P> {
    async fn on_event(&self, ctx: &RequestContext, envelope: &Envelope) {
        match envelope.kind.as_str() {
            EVENT_CALLBACK => self.handle_event_callback(ctx, envelope).await,
            other => info!(envelope_type = other, "unsupported_envelope_type"),
        }
    }
}
