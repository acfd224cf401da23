//! Reasons an inbound event request is dropped.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a request was dropped before reaching the callback.
///
/// Every variant produces the same empty response so the caller cannot
/// tell the reasons apart. The detail only goes to the logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid method: {0}")]
    InvalidMethod(String),

    #[error("request timestamp not found")]
    MissingTimestamp,

    #[error("invalid request timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("request timestamp too far in the past: {age_secs}s old")]
    StaleTimestamp { age_secs: u64 },

    #[error("request signature not found")]
    MissingSignature,

    #[error("read body: {0}")]
    UnreadableBody(String),

    #[error("invalid request signature")]
    InvalidSignature,

    #[error("decode request: {0}")]
    UndecodableBody(String),
}

impl Rejection {
    /// Log event name for this rejection.
    pub fn event_name(&self) -> &'static str {
        match self {
            Rejection::InvalidMethod(_) => "event_request_invalid_method",
            Rejection::MissingTimestamp => "event_request_timestamp_missing",
            Rejection::InvalidTimestamp(_) => "event_request_timestamp_invalid",
            Rejection::StaleTimestamp { .. } => "event_request_timestamp_stale",
            Rejection::MissingSignature => "event_request_signature_missing",
            Rejection::UnreadableBody(_) => "event_request_body_unreadable",
            Rejection::InvalidSignature => "event_request_signature_invalid",
            Rejection::UndecodableBody(_) => "event_request_decode_failed",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        StatusCode::OK.into_response()
    }
}
