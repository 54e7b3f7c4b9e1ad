use crate::{AppState, handlers, navigation::ROUTES};
use axum::{Router, routing::get};

/// Page Router Module
///
/// Registers every row of the navigation table on a single page handler. The caller wraps
/// this router in the navigation guard middleware, so the handler only ever runs for a
/// transition the guard let through.
pub fn page_routes() -> Router<AppState> {
    ROUTES.iter().fold(Router::new(), |router, route| {
        router.route(&route.axum_path(), get(handlers::render_page))
    })
}
