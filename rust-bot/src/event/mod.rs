//! Slack Events API payloads and the callback seam.
//!
//! The web handler decodes every verified request body into an
//! [`Envelope`] and hands anything that is not a URL verification
//! handshake to an [`EventCallback`].

pub mod callback;
pub mod types;

pub use callback::{EventCallback, RequestContext};
pub use types::{Envelope, Event, APP_MENTION, EVENT_CALLBACK, URL_VERIFICATION};
