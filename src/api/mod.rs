//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Guild commands are mounted under `/api/v1`; health and static palette
//! endpoints live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .merge(docs_router())
}

#[cfg(feature = "swagger-ui")]
fn docs_router() -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(
        SwaggerUi::new("/swagger-ui").url(openapi::OPENAPI_JSON_PATH, openapi::ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn docs_router() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    Router::new().route(
        openapi::OPENAPI_JSON_PATH,
        get(|| async { Json(openapi::ApiDoc::openapi()) }),
    )
}
