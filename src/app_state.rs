//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SplashService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Splash service; also gives access to the registry, ledger, and
    /// platform gateway.
    pub splash_service: Arc<SplashService>,
    /// History length used when a request does not name one.
    pub history_limit: u32,
}
