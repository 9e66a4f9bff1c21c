//! Domain layer: identifiers, the color palette, role records, splash
//! events, and the splash color selection rule.
//!
//! Nothing in this module performs I/O. The service layer loads data from
//! the [`crate::persistence::Storage`] and [`crate::gateway::ChatGateway`]
//! collaborators and hands it to these types.

pub mod color_role;
pub mod ids;
pub mod palette;
pub mod selection;
pub mod splash_event;

pub use color_role::ColorRoleRecord;
pub use ids::{GuildId, RoleId, UserId};
pub use palette::PaletteColor;
pub use selection::select_and_validate;
pub use splash_event::{HistoryLine, SplashEvent};
