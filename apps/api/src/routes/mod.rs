pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::maintenance::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Maintenance API
        .route(
            "/api/v1/maintenance/analyze",
            post(handlers::handle_analyze),
        )
        .route("/api/v1/maintenance/save", post(handlers::handle_save))
        .route("/api/v1/maintenance/list", get(handlers::handle_list))
        .route(
            "/api/v1/maintenance/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .with_state(state)
}
