//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::domain::resolution_event::ClientInfo;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. On cache miss (or cache error), query the store and fill the cache
/// 3. Publish a resolution event in the background
/// 4. Return 307 Temporary Redirect
///
/// The resolution event carries the `User-Agent` header and the peer IP
/// address (without port). Missing values are sent as empty strings.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the store could not be queried.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let client = ClientInfo::new(user_agent, Some(addr.ip()));

    let original_url = state.resolve_service.resolve(&short_code, &client).await?;

    Ok(Redirect::temporary(&original_url))
}

/// Answers `GET /` with 400, the path form of an empty short code.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required")
}
