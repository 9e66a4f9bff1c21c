//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PaletteColor;

/// Formats a packed `0xRRGGBB` value as `#RRGGBB`.
#[must_use]
pub fn hex_color(rgb: u32) -> String {
    format!("#{rgb:06X}")
}

/// One entry of the static palette.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaletteEntryDto {
    /// Palette color.
    pub color: PaletteColor,
    /// Role color as `#RRGGBB`.
    pub rgb: String,
}

impl From<PaletteColor> for PaletteEntryDto {
    fn from(color: PaletteColor) -> Self {
        Self {
            color,
            rgb: hex_color(color.rgb()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process answers.
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}
