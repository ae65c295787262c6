//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with dependency checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All dependencies healthy
/// - **503 Service Unavailable**: One or more dependencies degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "Redis connected" },
///     "bus": { "status": "ok", "message": "Bus connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, cache, bus) = tokio::join!(
        state.repository.health_check(),
        state.cache.health_check(),
        state.bus.health_check(),
    );

    let checks = HealthChecks {
        database: check(database, "Connected", "Database query failed"),
        cache: check(cache, "Redis connected", "Redis connection failed"),
        bus: check(bus, "Bus connected", "Bus connection failed"),
    };

    let all_healthy = checks.database.is_ok() && checks.cache.is_ok() && checks.bus.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check(healthy: bool, ok: &str, error: &str) -> CheckStatus {
    if healthy {
        CheckStatus::ok(ok)
    } else {
        CheckStatus::error(error)
    }
}
