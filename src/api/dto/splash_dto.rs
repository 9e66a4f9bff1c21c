//! Splash DTOs for the splash and history operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::SplashEvent;

/// Largest history page the command surface hands out.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Request body for `POST /guilds/{guild_id}/splashes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SplashRequest {
    /// Member issuing the splash.
    pub splasher_id: u64,
    /// Member receiving the color.
    pub target_id: u64,
    /// Color name (case-insensitive); random configured color if absent.
    #[serde(default)]
    pub color: Option<String>,
}

/// A recorded splash event.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SplashEventDto {
    /// Ledger sequence number.
    pub id: i64,
    /// Member who issued the splash.
    pub splasher_id: u64,
    /// Member who received the color.
    pub target_id: u64,
    /// Color assigned.
    pub color_name: String,
    /// Write time.
    pub timestamp: DateTime<Utc>,
}

impl From<&SplashEvent> for SplashEventDto {
    fn from(event: &SplashEvent) -> Self {
        Self {
            id: event.id,
            splasher_id: event.splasher_id.get(),
            target_id: event.target_id.get(),
            color_name: event.color_name.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Response body for `POST /guilds/{guild_id}/splashes` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct SplashResponse {
    /// The recorded event.
    pub event: SplashEventDto,
    /// Display name of the splasher.
    pub splasher_name: String,
    /// Display name of the target.
    pub target_name: String,
    /// Assigned role color as `#RRGGBB`.
    pub color_rgb: String,
    /// Announcement text.
    pub message: String,
}

/// Query parameters for `GET /guilds/{guild_id}/splashes`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Number of events to return (1–100). Defaults to the configured
    /// history limit.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl HistoryParams {
    /// Resolves the effective limit, clamped to `1..=100`.
    #[must_use]
    pub fn clamped(&self, default_limit: u32) -> u32 {
        self.limit
            .unwrap_or(default_limit)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// Response body for `GET /guilds/{guild_id}/splashes`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// Events, newest first.
    pub events: Vec<SplashEventDto>,
    /// One rendered line per event, same order.
    pub lines: Vec<String>,
    /// Full rendered message.
    pub text: String,
}
