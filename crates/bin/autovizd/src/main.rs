//! # autovizd — automation visualizer daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the Home Assistant client (adapter)
//! - Construct the diagram service, injecting the client via its port trait
//! - Spawn the background refresh loop
//! - Build the axum router, injecting the refresh handle
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

use autoviz_adapter_ha_rest::HaClient;
use autoviz_adapter_http_axum::state::AppState;
use autoviz_app::refresh::RefreshLoop;
use autoviz_app::services::diagram_service::DiagramService;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    if config.home_assistant.token.is_empty() {
        tracing::warn!("HA_TOKEN is not set, Home Assistant requests will fail authentication");
    }

    // Home Assistant adapter
    let client = HaClient::new(config.ha_config())?;

    // Diagram service + background refresh loop
    let service = DiagramService::new(client, config.render.mode);
    let (refresh_loop, refresh) = RefreshLoop::new(service, config.refresh_interval());
    tokio::spawn(refresh_loop.run());

    // HTTP
    let state = AppState::new(refresh, config.refresh_interval());
    let app = autoviz_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "autovizd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
