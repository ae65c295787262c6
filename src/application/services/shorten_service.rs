//! Two-phase creation of short URLs.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::services::ReachabilityVerifier;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_validator::validate_url;

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
}

/// Creates short URLs.
///
/// # Pipeline
///
/// 1. Validate the URL syntactically
/// 2. Insert the record without a code; the store assigns the id
/// 3. Derive the code from the id and attach it
/// 4. Schedule a detached reachability check for the new record
///
/// A failure in step 3 leaves a row without a code behind. It is never
/// resolvable and is not retried or rolled back here.
pub struct ShortenService {
    repository: Arc<dyn UrlRepository>,
    verifier: Arc<ReachabilityVerifier>,
    base_url: String,
}

impl ShortenService {
    /// Creates a shorten service.
    ///
    /// `base_url` is the public prefix of short URLs; a trailing slash is ignored.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        verifier: Arc<ReachabilityVerifier>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            repository,
            verifier,
            base_url,
        }
    }

    /// Shortens `original_url`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL has no scheme or host
    /// - [`AppError::Dependency`] if the insert or the code update fails
    pub async fn shorten(&self, original_url: &str) -> Result<ShortenedUrl, AppError> {
        if let Err(e) = validate_url(original_url) {
            warn!(url = original_url, error = %e, "Rejected URL");
            return Err(AppError::bad_request("Invalid URL"));
        }

        let id = self.repository.create_url(original_url).await.map_err(|e| {
            error!(error = %e, "Failed to create URL");
            AppError::dependency("Failed to create URL")
        })?;

        let sequence = u64::try_from(id).map_err(|_| {
            error!(id, "Store returned a negative id");
            AppError::dependency("Failed to create URL")
        })?;
        let short_code = base62::encode(sequence);

        if let Err(e) = self.repository.update_short_code(id, &short_code).await {
            error!(id, %short_code, error = %e, "Failed to update short code, row left without code");
            metrics::counter!("veritas_orphan_rows_total").increment(1);
            return Err(AppError::dependency("Failed to update short code"));
        }

        let short_url = format!("{}/{}", self.base_url, short_code);
        info!(id, %short_code, "Created short URL");
        metrics::counter!("veritas_urls_created_total").increment(1);

        // Detached: the result never reaches this response, and with a fast
        // probe the row may already be gone by the time the client reads it.
        self.verifier.schedule(id, original_url.to_string());

        Ok(ShortenedUrl {
            id,
            short_code,
            short_url,
        })
    }
}
