use std::sync::Arc;

use crate::auth::JwtService;
use crate::llm_client::TextGenerator;
use crate::maintenance::store::RequestStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable request store. Postgres when DATABASE_URL is set, in-memory otherwise.
    pub store: Arc<dyn RequestStore>,
    /// Language-model backend used by the analysis orchestrator.
    pub llm: Arc<dyn TextGenerator>,
    pub jwt: Arc<JwtService>,
}
