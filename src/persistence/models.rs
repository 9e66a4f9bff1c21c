//! Database row models for color roles and splash logs.

use chrono::{DateTime, Utc};

use crate::domain::{ColorRoleRecord, GuildId, PaletteColor, RoleId, SplashEvent, UserId};
use crate::error::BotError;

/// A row from the `holi_roles` table.
#[derive(Debug, Clone)]
pub struct ColorRoleRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Guild snowflake, stored signed.
    pub guild_id: i64,
    /// Role snowflake, stored signed.
    pub role_id: i64,
    /// Canonical palette color name.
    pub color_name: String,
}

impl TryFrom<ColorRoleRow> for ColorRoleRecord {
    type Error = BotError;

    fn try_from(row: ColorRoleRow) -> Result<Self, Self::Error> {
        let color = PaletteColor::parse_name(&row.color_name).ok_or_else(|| {
            BotError::StorageError(format!(
                "holi_roles row {} has unknown color {:?}",
                row.id, row.color_name
            ))
        })?;
        Ok(Self::new(
            GuildId::from_db(row.guild_id),
            RoleId::from_db(row.role_id),
            color,
        ))
    }
}

/// A row from the `splash_logs` table.
#[derive(Debug, Clone)]
pub struct SplashLogRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Guild snowflake, stored signed.
    pub guild_id: i64,
    /// Splasher snowflake, stored signed.
    pub splasher_id: i64,
    /// Target snowflake, stored signed.
    pub target_id: i64,
    /// Color name assigned.
    pub color_name: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<SplashLogRow> for SplashEvent {
    fn from(row: SplashLogRow) -> Self {
        Self {
            id: row.id,
            guild_id: GuildId::from_db(row.guild_id),
            splasher_id: UserId::from_db(row.splasher_id),
            target_id: UserId::from_db(row.target_id),
            color_name: row.color_name,
            timestamp: row.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn color_row_converts_with_lowercase_name() {
        let row = ColorRoleRow {
            id: 1,
            guild_id: 10,
            role_id: 20,
            color_name: "yellow".to_string(),
        };
        let Ok(record) = ColorRoleRecord::try_from(row) else {
            panic!("row should convert");
        };
        assert_eq!(record.color, PaletteColor::Yellow);
        assert_eq!(record.role_id, RoleId::new(20));
    }

    #[test]
    fn color_row_with_unknown_name_is_storage_error() {
        let row = ColorRoleRow {
            id: 9,
            guild_id: 10,
            role_id: 20,
            color_name: "Teal".to_string(),
        };
        assert!(matches!(
            ColorRoleRecord::try_from(row),
            Err(BotError::StorageError(_))
        ));
    }
}
