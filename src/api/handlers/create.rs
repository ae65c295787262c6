//! Handler for link creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use tracing::debug;
use validator::Validate;

use crate::api::dto::create::{CreateUrlRequest, CreateUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for one original URL.
///
/// # Endpoint
///
/// `POST /api/create`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "https://vrt.as/dnh" }
/// ```
///
/// The link is verified in the background after this response. If the
/// original URL turns out to be unreachable the link is deleted again.
///
/// # Errors
///
/// - 400 if the body is not valid JSON or the URL lacks a scheme or host
/// - 500 if the store fails
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        AppError::bad_request("Invalid request body")
    })?;

    payload.validate()?;

    let created = state.shorten_service.shorten(&payload.original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: created.short_url,
        }),
    ))
}
