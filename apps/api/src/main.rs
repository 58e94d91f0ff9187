mod cache;
mod config;
mod cover_letter;
mod errors;
mod files;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod usage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::ResearchCache;
use crate::config::Config;
use crate::cover_letter::LlmCoverLetterGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::usage::UsageTracker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting formfill API v{}", env!("CARGO_PKG_VERSION"));

    // Usage tracker: one per process, mutex-serialized appends
    let usage = Arc::new(UsageTracker::new(config.usage_log.clone()));

    // Initialize LLM client with cost accounting wired in
    let llm = LlmClient::new(config.anthropic_api_key.clone(), usage.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Cover-letter generator with its research cache
    let cache = ResearchCache::new(config.cache_dir.clone(), config.cache_max_age_days);
    let cover_letters = Arc::new(LlmCoverLetterGenerator::new(
        llm.clone(),
        cache,
        config.cover_letter_template.clone(),
        config.output_dir.clone(),
        config.applicant_name.clone(),
    ));
    info!(
        "Cover letter generator initialized (template: {})",
        config.cover_letter_template.display()
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        cover_letters,
        usage,
    };

    // Build router. CORS stays permissive — the caller is a browser
    // extension running on arbitrary job-board origins.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
