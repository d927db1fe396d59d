//! Campus Connect server
//!
//! Loads `campus.toml`, opens the document store, and serves the campus
//! data access layer over TCP until interrupted.

use campus_core::CampusConfig;
use campus_net::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod state;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Campus Connect");

    let config = match CampusConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match state::AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let state::AppState { config, bind, service } = app_state;
        tracing::debug!(?config, "Effective configuration");

        let server = match Server::start(bind, service).await {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("Failed to start server: {}", e);
                std::process::exit(1);
            }
        };

        tracing::info!(addr = %server.addr(), "Listening");

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }

        server.shutdown();
        tracing::info!("Campus Connect stopped");
    });
}
