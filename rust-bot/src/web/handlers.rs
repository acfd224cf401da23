//! Events API endpoint handlers.
//!
//! Each request is verified and dispatched in place:
//! 1. Check method, timestamp freshness and signature
//! 2. Decode the envelope
//! 3. Answer the URL verification handshake, or run the event callback
//!
//! The callback runs inside the request, so slow replies delay the
//! response to Slack.

use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::event::{Envelope, EventCallback, RequestContext, URL_VERIFICATION};
use crate::web::freshness::check_freshness;
use crate::web::rejection::Rejection;
use crate::web::signature::verify_signature;

/// Header carrying the request timestamp in seconds since the epoch.
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Header carrying the `v0=` request signature.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Upper bound on the request body read before verification.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EventHandler>,
}

impl AppState {
    pub fn new(handler: EventHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

/// Verifies inbound requests and dispatches their envelopes.
///
/// The secret and callback are fixed at construction.
pub struct EventHandler {
    signing_secret: String,
    callback: Arc<dyn EventCallback>,
}

/// What a verified request turned into.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Challenge(String),
    Dispatched,
}

impl EventHandler {
    pub fn new(signing_secret: impl Into<String>, callback: Arc<dyn EventCallback>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            callback,
        }
    }

    /// Handle one inbound request end to end.
    ///
    /// Rejected requests get an empty 200 response and a log line.
    pub async fn handle(&self, request: Request) -> Response {
        let cancel = CancellationToken::new();
        // Cancels outbound work when this future finishes or is dropped.
        let _guard = cancel.clone().drop_guard();
        let ctx = RequestContext::new(cancel);

        match self.dispatch(&ctx, request).await {
            Ok(Outcome::Challenge(challenge)) => (StatusCode::OK, challenge).into_response(),
            Ok(Outcome::Dispatched) => StatusCode::OK.into_response(),
            Err(rejection) => {
                warn!(
                    reason = rejection.event_name(),
                    error = %rejection,
                    "event_request_rejected"
                );
                rejection.into_response()
            }
        }
    }

    async fn dispatch(&self, ctx: &RequestContext, request: Request) -> Result<Outcome, Rejection> {
        let (parts, body) = request.into_parts();

        if parts.method != Method::POST {
            return Err(Rejection::InvalidMethod(parts.method.to_string()));
        }

        let timestamp =
            header_value(&parts.headers, TIMESTAMP_HEADER).ok_or(Rejection::MissingTimestamp)?;

        check_freshness(timestamp, SystemTime::now())?;

        let signature =
            header_value(&parts.headers, SIGNATURE_HEADER).ok_or(Rejection::MissingSignature)?;

        let body = read_body(body).await?;

        if !verify_signature(&self.signing_secret, timestamp, &body, signature) {
            return Err(Rejection::InvalidSignature);
        }

        let envelope =
            Envelope::decode(&body).map_err(|e| Rejection::UndecodableBody(e.to_string()))?;

        debug!(envelope_type = %envelope.kind, body_length = body.len(), "event_request_verified");

        match envelope.kind.as_str() {
            URL_VERIFICATION => {
                info!("url_verification_answered");
                Ok(Outcome::Challenge(envelope.challenge))
            }
            _ => {
                self.callback.on_event(ctx, &envelope).await;
                info!(envelope_type = %envelope.kind, "event_dispatched");
                Ok(Outcome::Dispatched)
            }
        }
    }
}

/// A non-empty, visible-ASCII header value.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

async fn read_body(body: Body) -> Result<axum::body::Bytes, Rejection> {
    body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| Rejection::UnreadableBody(e.to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Events Endpoint
// =============================================================================

/// Slack Events API endpoint.
///
/// Mounted for every method so that the method check is logged.
pub async fn slack_events(State(state): State<AppState>, request: Request) -> Response {
    state.handler.handle(request).await
}
