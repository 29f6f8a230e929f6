//! Insight HTTP Server Binary
//!
//! This is the main entry point for the e-commerce insight REST API server.
//! It loads and validates the configuration, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin insight-server
//!
//! # Reproducible output
//! INSIGHT_SEED=42 cargo run --bin insight-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `INSIGHT_CONFIG`: Path to a TOML config file (default: search for `insight.toml`)
//! - `INSIGHT_SEED`: Fixed random seed (overrides `[random].seed`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ecom_insight::config::{AnalyticsConfig, RandomSource};
use ecom_insight::http::{create_router, AppState};
use ecom_insight::AggregationFacade;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting insight HTTP server");

    // Configuration problems are fatal
    let (config, source) = AnalyticsConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    info!("Configuration loaded from {}", source);

    let random = RandomSource::resolve(&config.random).map_err(|e| anyhow::anyhow!(e))?;
    info!("Random source: {}", random);

    let facade = Arc::new(AggregationFacade::new(Arc::new(config)));
    let state = AppState::new(facade, random);

    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
