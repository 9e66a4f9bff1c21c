//! Splash handlers: splash a member, show splash history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::require_id;
use crate::api::dto::{
    HistoryParams, HistoryResponse, SplashEventDto, SplashRequest, SplashResponse, hex_color,
};
use crate::app_state::AppState;
use crate::domain::{GuildId, UserId};
use crate::error::{BotError, ErrorResponse};

/// `POST /guilds/{guild_id}/splashes` — Splash a member with a color.
///
/// # Errors
///
/// Returns [`BotError::NoRolesConfigured`], [`BotError::UnknownColor`],
/// [`BotError::MemberNotFound`], [`BotError::ColorRoleMissing`], or a
/// platform error.
#[utoipa::path(
    post,
    path = "/api/v1/guilds/{guild_id}/splashes",
    tag = "Splash",
    summary = "Splash a member",
    description = "Replaces the target's color role with the requested color, or a random configured one, and records the splash.",
    params(("guild_id" = u64, Path, description = "Guild snowflake")),
    request_body = SplashRequest,
    responses(
        (status = 201, description = "Member splashed", body = SplashResponse),
        (status = 400, description = "Invalid ids or color not available", body = ErrorResponse),
        (status = 403, description = "Bot lacks permission", body = ErrorResponse),
        (status = 404, description = "Member or role not found", body = ErrorResponse),
        (status = 409, description = "No palette configured", body = ErrorResponse),
    )
)]
pub async fn splash(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Json(req): Json<SplashRequest>,
) -> Result<impl IntoResponse, BotError> {
    let splasher_id = UserId::new(require_id(req.splasher_id, "splasher_id")?);
    let target_id = UserId::new(require_id(req.target_id, "target_id")?);
    let color = req.color.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let outcome = state
        .splash_service
        .splash(
            GuildId::new(guild_id),
            splasher_id,
            target_id,
            color,
        )
        .await?;

    let response = SplashResponse {
        event: SplashEventDto::from(&outcome.event),
        color_rgb: hex_color(outcome.color.rgb()),
        message: outcome.message(),
        splasher_name: outcome.splasher_name,
        target_name: outcome.target_name,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /guilds/{guild_id}/splashes` — Recent splash history.
///
/// # Errors
///
/// Returns [`BotError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/guilds/{guild_id}/splashes",
    tag = "Splash",
    summary = "Splash history",
    description = "Returns the guild's most recent splashes, newest first, with member names resolved.",
    params(("guild_id" = u64, Path, description = "Guild snowflake"), HistoryParams),
    responses(
        (status = 200, description = "Recent splashes", body = HistoryResponse),
    )
)]
pub async fn splash_history(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, BotError> {
    let limit = params.clamped(state.history_limit);
    let history = state
        .splash_service
        .history(GuildId::new(guild_id), Some(limit))
        .await?;

    Ok(Json(HistoryResponse {
        events: history.events.iter().map(SplashEventDto::from).collect(),
        lines: history.lines.iter().map(ToString::to_string).collect(),
        text: history.text(),
    }))
}

/// Splash routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/guilds/{guild_id}/splashes",
        post(splash).get(splash_history),
    )
}
