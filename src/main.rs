//! holi-bot server entry point.
//!
//! Wires storage, the platform gateway, and the services together and
//! starts the Axum HTTP command surface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use holi_bot::api;
use holi_bot::app_state::AppState;
use holi_bot::config::BotConfig;
use holi_bot::gateway::ChatGateway;
use holi_bot::gateway::discord::DiscordClient;
use holi_bot::persistence::{MemoryStorage, PostgresStorage, Storage};
use holi_bot::service::{RoleRegistry, SplashLedger, SplashService};

/// Upper bound on one command, covering every platform round trip it makes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_json);
    tracing::info!(addr = %config.listen_addr, ?config, "starting holi-bot");

    // Storage
    let storage: Arc<dyn Storage> = if config.persistence_enabled {
        let pg = PostgresStorage::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        tracing::info!("persistence enabled");
        Arc::new(pg)
    } else {
        tracing::warn!("persistence disabled; state is lost on restart");
        Arc::new(MemoryStorage::new())
    };

    // Platform gateway
    let gateway: Arc<dyn ChatGateway> = Arc::new(
        DiscordClient::new(
            &config.discord_api_base,
            &config.bot_token,
            Duration::from_secs(config.http_timeout_secs),
        )
        .context("building platform client")?,
    );

    // Service layer
    let registry = Arc::new(RoleRegistry::new(
        Arc::clone(&storage),
        Arc::clone(&gateway),
        config.verified_role_name.clone(),
    ));
    let ledger = Arc::new(SplashLedger::new(storage));
    let splash_service = Arc::new(SplashService::new(registry, ledger, gateway));

    let app_state = AppState {
        splash_service,
        history_limit: config.splash_history_limit,
    };

    let app = Router::new()
        .merge(api::build_router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
