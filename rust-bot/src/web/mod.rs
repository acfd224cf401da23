//! Web server module for the Slack Events API endpoint.
//!
//! A single `/event` route verifies and dispatches each request; `/health`
//! serves liveness probes.

pub mod freshness;
pub mod handlers;
pub mod rejection;
pub mod signature;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use freshness::{check_freshness, FRESHNESS_WINDOW};
pub use handlers::{
    health, slack_events, AppState, EventHandler, HealthResponse, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
pub use rejection::Rejection;
pub use signature::{compute_signature, verify_signature};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/event", any(slack_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
