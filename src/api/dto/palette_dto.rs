//! Palette DTOs for create, delete, and list operations.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::hex_color;
use crate::domain::{ColorRoleRecord, PaletteColor};
use crate::service::ColorFailure;

/// Request body for `POST /guilds/{guild_id}/palette`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaletteRequest {
    /// Member issuing the command; must be a guild administrator.
    pub invoker_id: u64,
}

/// Query parameters for `DELETE /guilds/{guild_id}/palette`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeletePaletteParams {
    /// Member issuing the command; must be a guild administrator.
    pub invoker_id: u64,
}

/// A registered color role.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorRoleDto {
    /// Palette color.
    pub color: PaletteColor,
    /// Platform role id.
    pub role_id: u64,
    /// Role color as `#RRGGBB`.
    pub rgb: String,
}

impl From<&ColorRoleRecord> for ColorRoleDto {
    fn from(record: &ColorRoleRecord) -> Self {
        Self {
            color: record.color,
            role_id: record.role_id.get(),
            rgb: hex_color(record.color.rgb()),
        }
    }
}

/// A color that could not be created.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorFailureDto {
    /// Palette color.
    pub color: PaletteColor,
    /// Platform error text.
    pub message: String,
}

impl From<&ColorFailure> for ColorFailureDto {
    fn from(failure: &ColorFailure) -> Self {
        Self {
            color: failure.color,
            message: failure.message.clone(),
        }
    }
}

/// Response body for `POST /guilds/{guild_id}/palette` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePaletteResponse {
    /// Guild the palette was created in.
    pub guild_id: u64,
    /// Number of roles created.
    pub created_count: usize,
    /// Roles created and registered.
    pub roles: Vec<ColorRoleDto>,
    /// Colors skipped because of platform failures.
    pub failures: Vec<ColorFailureDto>,
    /// Human-readable summary.
    pub message: String,
}

/// Response body for `DELETE /guilds/{guild_id}/palette`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletePaletteResponse {
    /// Guild the palette was deleted from.
    pub guild_id: u64,
    /// Number of platform roles deleted.
    pub deleted_count: usize,
    /// Human-readable summary.
    pub message: String,
}

/// Response body for `GET /guilds/{guild_id}/palette`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteListResponse {
    /// Guild queried.
    pub guild_id: u64,
    /// Registered color roles; empty if none.
    pub roles: Vec<ColorRoleDto>,
}
