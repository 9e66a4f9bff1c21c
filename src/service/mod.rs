//! Service layer: registry, ledger, and splash orchestration.
//!
//! [`RoleRegistry`] owns the per-guild color role set, [`SplashLedger`]
//! owns the splash log, and [`SplashService`] ties both to the chat
//! platform for the splash and history commands.

pub mod role_registry;
pub mod splash_ledger;
pub mod splash_service;

pub use role_registry::{ColorFailure, ColorSelection, PaletteCreation, RoleRegistry};
pub use splash_ledger::{DEFAULT_HISTORY_LIMIT, SplashLedger};
pub use splash_service::{SplashHistory, SplashOutcome, SplashService};
