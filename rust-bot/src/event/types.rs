//! Envelope and event types for the Slack Events API.

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope type of the app registration handshake.
pub const URL_VERIFICATION: &str = "url_verification";

/// Envelope type carrying a nested [`Event`].
pub const EVENT_CALLBACK: &str = "event_callback";

/// Event type sent when the app is mentioned in a channel.
pub const APP_MENTION: &str = "app_mention";

/// Top-level notification decoded from a verified request body.
///
/// Every field defaults to empty when absent and unknown fields are
/// ignored. `kind` decides which of the other fields are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    /// Legacy verification token, not used for authentication
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    /// Handshake value, present only for `url_verification`
    #[serde(deserialize_with = "null_as_default")]
    pub challenge: String,
    /// Envelope discriminator
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Nested event, present for `event_callback`
    #[serde(deserialize_with = "null_as_default")]
    pub event: Event,
}

/// A single platform event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event discriminator
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Originating user ID
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    /// Message text
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    /// Channel the event happened in
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
}

impl Envelope {
    /// Decode an envelope from raw JSON bytes.
    ///
    /// A `null` body or field decodes to its empty default.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Option<Envelope> = serde_json::from_slice(body)?;
        Ok(envelope.unwrap_or_default())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
