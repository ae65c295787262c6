//! URL record entity.

use chrono::{DateTime, Utc};

/// A stored original URL.
///
/// `short_code` is `None` between the insert and the code assignment, or forever
/// if the second write failed. Such a record is not resolvable.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn new(
        id: i64,
        original_url: String,
        short_code: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }

    /// Returns true once a short code has been attached.
    pub fn is_resolvable(&self) -> bool {
        self.short_code.is_some()
    }
}
