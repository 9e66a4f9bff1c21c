//! Registry record mapping a palette color to an external role.

use serde::Serialize;

use super::{GuildId, PaletteColor, RoleId};

/// A color role the registry knows about for one guild.
///
/// At most one record exists per `(guild_id, color)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorRoleRecord {
    /// Guild the role lives in.
    pub guild_id: GuildId,
    /// Platform role that carries the color.
    pub role_id: RoleId,
    /// Palette entry the role represents.
    pub color: PaletteColor,
}

impl ColorRoleRecord {
    /// Creates a new record.
    #[must_use]
    pub const fn new(guild_id: GuildId, role_id: RoleId, color: PaletteColor) -> Self {
        Self {
            guild_id,
            role_id,
            color,
        }
    }

    /// Returns `true` when `name` names this record's color, ignoring case
    /// and surrounding whitespace.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.color.name().eq_ignore_ascii_case(name.trim())
    }
}
