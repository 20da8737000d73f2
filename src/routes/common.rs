//! Common routes: health, readiness, version.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::response::{live, package_version, readiness, StatusBody};
use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    match state.store.ping().await {
        Ok(()) => readiness(true),
        Err(e) => {
            tracing::warn!(error = %e, "store ping failed");
            readiness(false)
        }
    }
}

/// Liveness, store readiness and the running build.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { live() }))
        .route("/ready", get(ready))
        .route("/version", get(|| async { package_version() }))
        .with_state(state)
}
