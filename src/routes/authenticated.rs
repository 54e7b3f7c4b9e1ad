use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Authenticated Router Module
///
/// The employee API used by the list, profile and import views. Every handler here relies
/// on the `AuthUser` extractor middleware layered on by `create_router`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/employees
        .route("/api/employees", get(handlers::list_employees))
        // GET /api/employees/export?file_name=...
        // Downloads all employees as `<file_name>.csv`.
        .route("/api/employees/export", get(handlers::export_employees))
        // GET /api/employees/{id}
        .route("/api/employees/{id}", get(handlers::get_employee))
        // POST /api/employees/import/preview
        // Parses and validates an upload without storing it, so the view can list
        // every row-level problem first.
        .route(
            "/api/employees/import/preview",
            post(handlers::preview_import),
        )
        // POST /api/employees/import
        // Stores the batch only when it parses and validates cleanly.
        .route("/api/employees/import", post(handlers::import_employees))
}
