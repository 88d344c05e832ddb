mod catalog;
mod cms_client;
mod config;
mod contact;
mod errors;
mod models;
mod pages;
mod routes;
mod state;
mod theme;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cms_client::CmsClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting summit site v{}", env!("CARGO_PKG_VERSION"));

    if config.admin.uses_dev_defaults() {
        warn!("CMS admin secrets are development defaults; set ADMIN_JWT_SECRET, API_TOKEN_SALT and TRANSFER_TOKEN_SALT");
    }

    let cms = CmsClient::new(&config.cms_url, config.cms_api_token.clone())?;
    info!(
        "Content API client initialized ({}, token: {})",
        config.cms_url,
        if config.cms_api_token.is_some() { "set" } else { "none" }
    );

    let state = AppState::new(Arc::new(cms), config.clone());
    info!("Theme: {}", state.theme.get().as_str());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
