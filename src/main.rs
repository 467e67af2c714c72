// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::render_service::RenderService;
use crate::infrastructure::config::load_server_config;
use crate::infrastructure::nightscout_repository::NightscoutRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, render_page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_server_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(NightscoutRepository::new());

    // Create services (application layer)
    let render_service = RenderService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        render_service,
        nightscout_defaults: config.nightscout,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(render_page))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.listen.parse()?;
    tracing::info!("starting glucopanel on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
