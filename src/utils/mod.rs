//! Utility functions for code generation and request validation.
//!
//! - [`base62`] - Reversible id ↔ short code codec
//! - [`url_validator`] - Syntactic URL checks for incoming links

pub mod base62;
pub mod url_validator;
