use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable with or without an authentication marker.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /api/navigation?to=...
        // Runs the navigation guard for the caller's marker and reports the final
        // destination after all redirects.
        .route("/api/navigation", get(handlers::get_navigation))
}
