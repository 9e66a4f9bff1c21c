//! System endpoints: health check, static palette.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, PaletteEntryDto};
use crate::app_state::AppState;
use crate::domain::PaletteColor;

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/palette` — List every palette color.
#[utoipa::path(
    get,
    path = "/config/palette",
    tag = "System",
    summary = "List palette colors",
    description = "Returns the static palette, in role-creation order, with role colors.",
    responses(
        (status = 200, description = "Palette catalog", body = Vec<PaletteEntryDto>),
    )
)]
pub async fn palette_handler() -> impl IntoResponse {
    let entries: Vec<PaletteEntryDto> = PaletteColor::ALL
        .into_iter()
        .map(PaletteEntryDto::from)
        .collect();
    (StatusCode::OK, Json(entries))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/palette", get(palette_handler))
}
