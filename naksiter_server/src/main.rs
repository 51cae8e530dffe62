//! Naksiter Server - URL reputation and phishing-heuristic service
//!
//! This server handles:
//! - URL classification (trusted domains, look-alikes, keyword score,
//!   reachability, crowd reports)
//! - Abuse report submission with per-submitter rate limiting
//! - Recent report history
//! - Page previews through a summarization API

mod abuse;
mod config;
mod preview;
mod probe;
mod reputation;
mod routes;

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,naksiter_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting Naksiter server on {}:{}", config.host, config.port);
    tracing::info!("Trusted domains: {}", config.trusted_domains.join(", "));
    tracing::info!("Probe timeout: {:?}", config.probe_timeout);
    if !config.summarizer_enabled() {
        tracing::warn!("OPENAI_API_KEY not set, /preview will answer with an error message");
    }
    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving static files from {}", dir.display());
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Create app state
    let state = routes::AppState::new(config)?;
    let app = routes::router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
