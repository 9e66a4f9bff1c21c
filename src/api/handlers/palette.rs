//! Palette handlers: create, delete, list, and resolve a guild's color
//! roles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::require_id;
use crate::api::dto::{
    ColorFailureDto, ColorRoleDto, CreatePaletteRequest, CreatePaletteResponse,
    DeletePaletteParams, DeletePaletteResponse, PaletteListResponse,
};
use crate::app_state::AppState;
use crate::domain::{GuildId, UserId};
use crate::error::{BotError, ErrorResponse};

/// `POST /guilds/{guild_id}/palette` — Create the guild's color roles.
///
/// # Errors
///
/// Returns [`BotError::MissingPermission`] for non-administrators,
/// [`BotError::AlreadyExists`] if a palette exists, or
/// [`BotError::Forbidden`] if the bot cannot manage roles.
#[utoipa::path(
    post,
    path = "/api/v1/guilds/{guild_id}/palette",
    tag = "Palette",
    summary = "Create Holi color roles",
    description = "Creates one role per palette color above the guild's verified role and registers them. Non-fatal per-color failures are reported in `failures`.",
    params(("guild_id" = u64, Path, description = "Guild snowflake")),
    request_body = CreatePaletteRequest,
    responses(
        (status = 201, description = "Palette created", body = CreatePaletteResponse),
        (status = 400, description = "Invalid invoker", body = ErrorResponse),
        (status = 403, description = "Invoker or bot lacks permission", body = ErrorResponse),
        (status = 409, description = "Palette already exists", body = ErrorResponse),
    )
)]
pub async fn create_palette(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Json(req): Json<CreatePaletteRequest>,
) -> Result<impl IntoResponse, BotError> {
    let guild_id = GuildId::new(guild_id);
    let invoker_id = UserId::new(require_id(req.invoker_id, "invoker_id")?);
    ensure_administrator(&state, guild_id, invoker_id).await?;

    let outcome = state.splash_service.registry().create_roles(guild_id).await?;

    let response = CreatePaletteResponse {
        guild_id: guild_id.get(),
        created_count: outcome.created_count(),
        roles: outcome.created.iter().map(ColorRoleDto::from).collect(),
        failures: outcome.failures.iter().map(ColorFailureDto::from).collect(),
        message: format!("Created {} Holi color roles.", outcome.created_count()),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `DELETE /guilds/{guild_id}/palette` — Delete the guild's color roles.
///
/// # Errors
///
/// Returns [`BotError::MissingPermission`] for non-administrators,
/// [`BotError::NotFound`] if no palette exists, or
/// [`BotError::Forbidden`] if the bot cannot manage roles.
#[utoipa::path(
    delete,
    path = "/api/v1/guilds/{guild_id}/palette",
    tag = "Palette",
    summary = "Delete Holi color roles",
    description = "Deletes every registered color role from the guild and clears the registry.",
    params(("guild_id" = u64, Path, description = "Guild snowflake"), DeletePaletteParams),
    responses(
        (status = 200, description = "Palette deleted", body = DeletePaletteResponse),
        (status = 403, description = "Invoker or bot lacks permission", body = ErrorResponse),
        (status = 404, description = "No palette registered", body = ErrorResponse),
    )
)]
pub async fn delete_palette(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(params): Query<DeletePaletteParams>,
) -> Result<impl IntoResponse, BotError> {
    let guild_id = GuildId::new(guild_id);
    let invoker_id = UserId::new(require_id(params.invoker_id, "invoker_id")?);
    ensure_administrator(&state, guild_id, invoker_id).await?;

    let deleted_count = state.splash_service.registry().delete_roles(guild_id).await?;

    Ok(Json(DeletePaletteResponse {
        guild_id: guild_id.get(),
        deleted_count,
        message: format!("Deleted {deleted_count} Holi roles from the server."),
    }))
}

/// `GET /guilds/{guild_id}/palette` — List the guild's registered roles.
///
/// # Errors
///
/// Returns [`BotError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/guilds/{guild_id}/palette",
    tag = "Palette",
    summary = "List Holi color roles",
    description = "Returns the guild's registered color roles; empty when none exist.",
    params(("guild_id" = u64, Path, description = "Guild snowflake")),
    responses(
        (status = 200, description = "Registered roles", body = PaletteListResponse),
    )
)]
pub async fn list_palette(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, BotError> {
    let guild_id = GuildId::new(guild_id);
    let records = state.splash_service.registry().list_roles(guild_id).await?;

    Ok(Json(PaletteListResponse {
        guild_id: guild_id.get(),
        roles: records.iter().map(ColorRoleDto::from).collect(),
    }))
}

/// `GET /guilds/{guild_id}/palette/{color}` — Resolve one color to its role.
///
/// # Errors
///
/// Returns [`BotError::NoRolesConfigured`] if the guild has no palette,
/// [`BotError::UnknownColor`] if the color is not registered, or
/// [`BotError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/guilds/{guild_id}/palette/{color}",
    tag = "Palette",
    summary = "Resolve a color",
    description = "Looks up the registered role for a color name, ignoring case.",
    params(
        ("guild_id" = u64, Path, description = "Guild snowflake"),
        ("color" = String, Path, description = "Color name, any case"),
    ),
    responses(
        (status = 200, description = "Registered role", body = ColorRoleDto),
        (status = 400, description = "Color not registered", body = ErrorResponse),
        (status = 409, description = "No palette configured", body = ErrorResponse),
    )
)]
pub async fn resolve_color(
    State(state): State<AppState>,
    Path((guild_id, color)): Path<(u64, String)>,
) -> Result<impl IntoResponse, BotError> {
    let guild_id = GuildId::new(guild_id);
    let registry = state.splash_service.registry();

    if let Some(record) = registry.resolve_color(guild_id, &color).await? {
        return Ok(Json(ColorRoleDto::from(&record)));
    }

    let configured = registry.list_roles(guild_id).await?;
    if configured.is_empty() {
        return Err(BotError::NoRolesConfigured);
    }
    Err(BotError::UnknownColor {
        requested: color.trim().to_string(),
        choices: configured.iter().map(|r| r.color.name().to_string()).collect(),
    })
}

/// Palette management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/{guild_id}/palette",
            post(create_palette).delete(delete_palette).get(list_palette),
        )
        .route("/guilds/{guild_id}/palette/{color}", get(resolve_color))
}

/// Rejects invokers who are not guild administrators.
async fn ensure_administrator(
    state: &AppState,
    guild_id: GuildId,
    invoker_id: UserId,
) -> Result<(), BotError> {
    let is_admin = state
        .splash_service
        .gateway()
        .is_administrator(guild_id, invoker_id)
        .await?;
    if is_admin {
        Ok(())
    } else {
        tracing::info!(%guild_id, %invoker_id, "palette command refused");
        Err(BotError::MissingPermission(invoker_id))
    }
}
