//! Weather probability analysis HTTP server.
//!
//! Entry point for the REST API. Builds the sample provider, configuration,
//! and result cache, then serves the axum router.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin wpa-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CONFIG_PATH`: Optional TOML configuration file
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wpa_rust::cache::AnalysisCache;
use wpa_rust::config::AppConfig;
use wpa_rust::http::{create_router, AppState};
use wpa_rust::provider::SyntheticProvider;
use wpa_rust::services::Analyzer;

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
        .init();

    info!("Starting weather probability analysis server");

    let config = match env::var("CONFIG_PATH") {
        Ok(path) => {
            info!(path = %path, "loading configuration file");
            AppConfig::load(&path)?
        }
        Err(_) => AppConfig::default(),
    };
    let ttl = Duration::from_secs(config.analysis.cache_ttl_secs);

    let analyzer = Analyzer::new(Arc::new(SyntheticProvider::new()), Arc::new(config))
        .with_cache(Arc::new(AnalysisCache::new(ttl)));
    let state = AppState::new(Arc::new(analyzer));
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
