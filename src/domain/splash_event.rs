//! Splash ledger entries and their display form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{GuildId, UserId};

/// Display format for event timestamps in history listings.
pub const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single recorded splash.
///
/// Events are append-only. `id` is the storage surrogate key and defines
/// insertion order; `timestamp` only has display value, since two events
/// may share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplashEvent {
    /// Storage-assigned, strictly increasing sequence number.
    pub id: i64,
    /// Guild the splash happened in.
    pub guild_id: GuildId,
    /// Member who issued the splash.
    pub splasher_id: UserId,
    /// Member who received the color.
    pub target_id: UserId,
    /// Canonical name of the color assigned.
    pub color_name: String,
    /// Write time.
    pub timestamp: DateTime<Utc>,
}

/// A splash event with member names resolved for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryLine {
    /// Event timestamp formatted as `YYYY-MM-DD HH:MM`.
    pub time: String,
    /// Display name of the splasher, or a `User(<id>)` fallback.
    pub splasher_name: String,
    /// Display name of the target, or a `User(<id>)` fallback.
    pub target_name: String,
    /// Color assigned.
    pub color_name: String,
}

impl HistoryLine {
    /// Builds a line from an event and already-resolved names.
    #[must_use]
    pub fn new(event: &SplashEvent, splasher_name: String, target_name: String) -> Self {
        Self {
            time: event.timestamp.format(HISTORY_TIME_FORMAT).to_string(),
            splasher_name,
            target_name,
            color_name: event.color_name.clone(),
        }
    }
}

impl fmt::Display for HistoryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` – **{}** splashed **{}** with **{}**",
            self.time, self.splasher_name, self.target_name, self.color_name
        )
    }
}

/// Name shown for a member the platform can no longer resolve.
#[must_use]
pub fn fallback_name(user_id: UserId) -> String {
    format!("User({user_id})")
}

/// Renders a full history message, header included.
#[must_use]
pub fn render_history(lines: &[HistoryLine]) -> String {
    if lines.is_empty() {
        return "No splash events recorded yet.".to_string();
    }
    let body: Vec<String> = lines.iter().map(ToString::to_string).collect();
    format!(
        "**Last {} Splash Events:**\n{}",
        lines.len(),
        body.join("\n")
    )
}
