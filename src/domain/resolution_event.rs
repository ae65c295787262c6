//! Resolution event model for redirect analytics.

use std::net::IpAddr;

/// One successful resolution of a short code.
///
/// Built by the resolution pipeline and handed to
/// [`crate::application::services::EventPublisher`], which serializes it with the
/// versioned wire schema in [`crate::events::v1`]. It is not persisted anywhere by
/// this service.
///
/// Missing client metadata is carried as empty strings, matching the wire schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEvent {
    pub short_code: String,
    pub original_url: String,
    pub user_agent: String,
    pub ip_address: String,
}

impl ResolutionEvent {
    /// Creates a new resolution event.
    ///
    /// # Arguments
    ///
    /// - `short_code` - The code that was resolved
    /// - `original_url` - The URL the caller is redirected to
    /// - `client` - Metadata of the resolving caller
    pub fn new(short_code: String, original_url: String, client: &ClientInfo) -> Self {
        Self {
            short_code,
            original_url,
            user_agent: client.user_agent.clone().unwrap_or_default(),
            ip_address: client.ip.map(|ip| ip.to_string()).unwrap_or_default(),
        }
    }
}

/// Caller metadata captured from the inbound request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip: Option<IpAddr>,
}

impl ClientInfo {
    pub fn new(user_agent: Option<&str>, ip: Option<IpAddr>) -> Self {
        Self {
            user_agent: user_agent.map(|s| s.to_string()),
            ip,
        }
    }
}
