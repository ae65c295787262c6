//! Syntactic URL validation for the creation pipeline.
//!
//! Only well-formedness is checked here. Whether the target actually answers is
//! decided later by the reachability verifier, after the record exists.

use url::Url;

/// Reasons a candidate URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL contains whitespace or control characters")]
    IllegalCharacters,

    #[error("URL has no scheme")]
    MissingScheme,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `candidate` parses as an absolute URL with a non-empty scheme and host.
///
/// The input is checked as given: surrounding whitespace and control characters
/// are rejected rather than stripped, so the accepted string is exactly what
/// ends up in a `Location` header. No network access happens here.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first failed rule.
///
/// # Examples
///
/// ```
/// use veritas::utils::url_validator::validate_url;
///
/// assert!(validate_url("https://example.com/a?b=c").is_ok());
/// assert!(validate_url("example.com").is_err());
/// assert!(validate_url("mailto:someone@example.com").is_err());
/// ```
pub fn validate_url(candidate: &str) -> Result<Url, UrlValidationError> {
    if candidate.trim() != candidate || candidate.chars().any(char::is_control) {
        return Err(UrlValidationError::IllegalCharacters);
    }

    let parsed = Url::parse(candidate)?;

    if parsed.scheme().is_empty() {
        return Err(UrlValidationError::MissingScheme);
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(UrlValidationError::MissingHost),
    }
}
