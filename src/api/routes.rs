//! API route configuration.

use crate::api::handlers::create_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// All routes under `/api`.
///
/// # Endpoints
///
/// - `POST /create` - Create a short URL
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/create", post(create_handler))
}
