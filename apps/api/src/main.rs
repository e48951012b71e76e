mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod maintenance;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtService;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::maintenance::store::{InMemoryRequestStore, PgRequestStore, RequestStore};
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Upkeep API v{}", env!("CARGO_PKG_VERSION"));

    // Request store: PostgreSQL when configured, otherwise process memory
    let store: Arc<dyn RequestStore> = match &config.database_url {
        Some(url) => Arc::new(PgRequestStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; maintenance requests will be kept in memory only");
            Arc::new(InMemoryRequestStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    if llm.has_credentials() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY not set; analysis requests will return 503");
    }

    let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone());
    info!("Access tokens verified for issuer '{}'", config.jwt_issuer);

    // Build app state
    let state = AppState {
        store,
        llm: Arc::new(llm),
        jwt: Arc::new(jwt),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
