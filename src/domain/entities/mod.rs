//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted original URL and its (eventual) short code

pub mod url_record;

pub use url_record::UrlRecord;
