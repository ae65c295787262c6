//! `veritas.events.v1` - mirrors `proto/events/v1/redirect_event.proto`.

use prost::Message;

use crate::domain::resolution_event::ResolutionEvent;

/// Topic carrying [`RedirectEvent`] payloads.
pub const REDIRECT_SUCCESS_TOPIC: &str = "veritas.redirect.success";

/// Protobuf message `veritas.events.v1.RedirectEvent`.
#[derive(Clone, PartialEq, Message)]
pub struct RedirectEvent {
    #[prost(string, tag = "1")]
    pub short_code: String,
    #[prost(string, tag = "2")]
    pub original_url: String,
    #[prost(string, tag = "3")]
    pub user_agent: String,
    #[prost(string, tag = "4")]
    pub ip_address: String,
}

impl From<&ResolutionEvent> for RedirectEvent {
    fn from(event: &ResolutionEvent) -> Self {
        Self {
            short_code: event.short_code.clone(),
            original_url: event.original_url.clone(),
            user_agent: event.user_agent.clone(),
            ip_address: event.ip_address.clone(),
        }
    }
}

impl From<RedirectEvent> for ResolutionEvent {
    fn from(message: RedirectEvent) -> Self {
        Self {
            short_code: message.short_code,
            original_url: message.original_url,
            user_agent: message.user_agent,
            ip_address: message.ip_address,
        }
    }
}

/// Serializes a resolution event into its v1 wire form.
pub fn encode_event(event: &ResolutionEvent) -> Vec<u8> {
    RedirectEvent::from(event).encode_to_vec()
}

/// Parses a v1 payload received from the bus.
///
/// # Errors
///
/// Returns [`prost::DecodeError`] if the bytes are not a valid `RedirectEvent`.
pub fn decode_event(payload: &[u8]) -> Result<ResolutionEvent, prost::DecodeError> {
    RedirectEvent::decode(payload).map(ResolutionEvent::from)
}
