//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod redirect;

pub use create::create_handler;
pub use health::health_handler;
pub use redirect::{missing_code_handler, redirect_handler};
