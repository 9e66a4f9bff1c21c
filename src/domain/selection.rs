//! Splash color selection.
//!
//! When no color is requested the pick is drawn from the colors the guild
//! has actually registered, never from the full static palette: a guild
//! configured with only a subset would otherwise fail resolution for the
//! colors it never created.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::ColorRoleRecord;
use crate::error::BotError;

/// Chooses and resolves the color role for a splash.
///
/// `records` is the guild's current registry contents. With
/// `requested = None` a record is chosen uniformly at random from
/// `records`; otherwise the name is matched case-insensitively.
///
/// # Errors
///
/// - [`BotError::NoRolesConfigured`] if `records` is empty.
/// - [`BotError::UnknownColor`] if `requested` matches no record; the
///   error lists the configured choices.
pub fn select_and_validate<R: Rng + ?Sized>(
    records: &[ColorRoleRecord],
    requested: Option<&str>,
    rng: &mut R,
) -> Result<ColorRoleRecord, BotError> {
    if records.is_empty() {
        return Err(BotError::NoRolesConfigured);
    }

    let name = match requested {
        Some(name) => name,
        None => records
            .choose(rng)
            .map(|record| record.color.name())
            .ok_or(BotError::NoRolesConfigured)?,
    };

    records
        .iter()
        .find(|record| record.matches_name(name))
        .copied()
        .ok_or_else(|| BotError::UnknownColor {
            requested: name.trim().to_string(),
            choices: records.iter().map(|r| r.color.name().to_string()).collect(),
        })
}
