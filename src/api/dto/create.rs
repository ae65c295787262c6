//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// Only presence is checked here; URL syntax is checked by
/// [`crate::application::services::ShortenService`].
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "Invalid URL"))]
    pub original_url: String,
}

/// Response for a created short URL.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub short_url: String,
}
