//! The fixed Holi color palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the color names the bot recognizes.
///
/// The palette is closed: guild role sets are always drawn from these
/// entries. Names compare case-insensitively; the canonical spelling is
/// title case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PaletteColor {
    /// `#E74C3C`
    Red,
    /// `#FFA500`
    Orange,
    /// `#FFFF00`
    Yellow,
    /// `#2ECC71`
    Green,
    /// `#3498DB`
    Blue,
    /// `#9B59B6`
    Purple,
    /// `#FF69B4`
    Pink,
}

impl PaletteColor {
    /// Every palette entry, in role-creation order.
    pub const ALL: [Self; 7] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Pink,
    ];

    /// Canonical (title case) name, also used as the external role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
        }
    }

    /// Role color as a packed `0xRRGGBB` integer.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Red => 0x00E7_4C3C,
            Self::Orange => 0x00FF_A500,
            Self::Yellow => 0x00FF_FF00,
            Self::Green => 0x002E_CC71,
            Self::Blue => 0x0034_98DB,
            Self::Purple => 0x009B_59B6,
            Self::Pink => 0x00FF_69B4,
        }
    }

    /// Case-insensitive lookup ignoring surrounding whitespace.
    #[must_use]
    pub fn parse_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no palette color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette color: {0}")]
pub struct UnknownPaletteColor(pub String);

impl FromStr for PaletteColor {
    type Err = UnknownPaletteColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| UnknownPaletteColor(s.to_string()))
    }
}
