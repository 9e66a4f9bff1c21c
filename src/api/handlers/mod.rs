//! REST endpoint handlers organized by resource.

pub mod palette;
pub mod splash;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::error::BotError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(palette::routes())
        .merge(splash::routes())
}

/// Rejects the zero snowflake, which the platform never assigns.
fn require_id(raw: u64, field: &str) -> Result<u64, BotError> {
    if raw == 0 {
        return Err(BotError::InvalidRequest(format!(
            "{field} must be a non-zero snowflake"
        )));
    }
    Ok(raw)
}
