//! Pingbot - Slack Events API receiver.
//!
//! This library holds the pieces behind the `pingbot` binary:
//! - `web`: request verification (signature, freshness) and dispatch
//! - `event`: envelope types and the event callback seam
//! - `bot`: the ping/help mention responder
//! - `slack`: outbound `chat.postMessage` client
//!
//! ## Request Flow
//!
//! ```text
//! POST /event → freshness → signature → decode → challenge echo | EventCallback
//! ```

pub mod bot;
pub mod config;
pub mod event;
pub mod slack;
pub mod web;

// Re-export commonly used types
pub use bot::PingBot;
pub use config::{Args, Config, ConfigError};
pub use event::{Envelope, Event, EventCallback, RequestContext};
pub use slack::{MessagePoster, SlackClient, SlackError};
pub use web::{router, AppState, EventHandler};
