// Main entry point for the API server

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use analysis::{Analyzer, AnalyzerConfig, GeminiModel, HttpRenderer, MemoryStore};
use server_core::{
    server::{build_app, AppState},
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,analysis=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AI Ethics Detector API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Build the analysis pipeline
    let renderer = HttpRenderer::new()
        .with_user_agent(config.user_agent.clone())
        .with_max_page_size(config.max_page_size);
    let model = GeminiModel::new(config.google_api_key.clone());
    let analyzer_config =
        AnalyzerConfig::default().with_scrape_timeout(Duration::from_secs(config.scraping_timeout));
    let analyzer = Analyzer::with_config(renderer, model, MemoryStore::new(), analyzer_config);

    // Build application
    let state = AppState::new(analyzer, config.max_concurrent_analyses);
    let app = build_app(state, &config);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/v1/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
