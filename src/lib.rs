//! # holi-bot
//!
//! Holi color-role bot for chat-platform guilds.
//!
//! Administrators create a palette of seven color roles per guild; members
//! then "splash" each other, which swaps the target's color role and
//! appends an entry to a per-guild splash ledger.
//!
//! ## Architecture
//!
//! ```text
//! Command surface (HTTP, api/)
//!     │
//!     ├── SplashService (service/)
//!     │     ├── RoleRegistry ── selection rule (domain/)
//!     │     └── SplashLedger
//!     │
//!     ├── ChatGateway (gateway/) ── platform REST API
//!     │
//!     └── Storage (persistence/) ── PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod persistence;
pub mod service;

#[cfg(test)]
mod test_support;
