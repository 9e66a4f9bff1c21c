//! Type-safe platform identifiers.
//!
//! The chat platform hands out 64-bit "snowflake" identifiers for guilds,
//! users, and roles. Each gets its own newtype so a role id can never be
//! passed where a guild id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw snowflake value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns the value as stored in a signed `BIGINT` column.
            ///
            /// Snowflakes stay below `2^63` for the lifetime of the platform,
            /// so the conversion is lossless in practice; the bit pattern is
            /// preserved either way.
            #[must_use]
            #[allow(clippy::cast_possible_wrap)]
            pub const fn to_db(self) -> i64 {
                self.0 as i64
            }

            /// Rebuilds an identifier from a signed `BIGINT` column value.
            #[must_use]
            #[allow(clippy::cast_sign_loss)]
            pub const fn from_db(raw: i64) -> Self {
                Self(raw as u64)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

snowflake_id!(
    /// Identifier of a guild (server) on the chat platform.
    GuildId
);

snowflake_id!(
    /// Identifier of a user (member) on the chat platform.
    UserId
);

snowflake_id!(
    /// Identifier of a role on the chat platform.
    RoleId
);
