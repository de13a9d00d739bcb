mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod session;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::settings::{params, rules, SuffixMode, Workspace};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_BIN_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting keyprompt v{}", env!("CARGO_PKG_VERSION"));

    // Prepare the data directory and first-run defaults
    let workspace = Workspace::new(&config.data_dir);
    workspace
        .prepare()
        .with_context(|| format!("Failed to create data directory {}", config.data_dir.display()))?;
    rules::ensure_default(&workspace, config.suffix_mode).context("Failed to write default rules")?;
    if config.suffix_mode == SuffixMode::Params {
        params::ensure_default(&workspace).context("Failed to write default parameters")?;
    }
    info!(
        "Data directory {} ({} layout)",
        workspace.root().display(),
        config.suffix_mode
    );

    let llm = OpenAiClient::new(config.openai_base_url.clone());
    info!(
        "Completion client initialized ({}, {} requests)",
        config.openai_base_url, config.batch_strategy
    );

    let state = AppState {
        config: config.clone(),
        workspace,
        llm: Arc::new(llm),
        sessions: SessionStore::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
