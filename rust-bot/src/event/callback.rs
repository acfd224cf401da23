//! The event callback trait and the per-request context handed to it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::types::Envelope;

/// Per-request context passed to the callback and on to outbound calls.
///
/// The token is cancelled once the inbound request is finished or dropped,
/// so work started on its behalf can stop early.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait until the request is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

/// Application logic invoked for every verified, non-handshake envelope.
///
/// The envelope is borrowed for the duration of the call only.
#[async_trait]
pub trait EventCallback: Send + Sync {
    async fn on_event(&self, ctx: &RequestContext, envelope: &Envelope);
}
