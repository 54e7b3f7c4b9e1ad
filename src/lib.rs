use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod csv_codec;
pub mod error;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod repository;

// Routing split by access decision (pages, public, authenticated API).
pub mod routes;
use auth::{AuthMarker, AuthUser};
use navigation::NavigationOutcome;
use routes::{authenticated, pages, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use repository::{InMemoryRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for the JSON and CSV endpoints, served at `/api-docs/openapi.json`.
/// Page routes are not listed; they answer the SPA's navigation, not API clients.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_navigation, handlers::list_employees, handlers::get_employee,
        handlers::export_employees, handlers::preview_import, handlers::import_employees
    ),
    components(
        schemas(
            models::Employee, models::ImportPreview, models::ImportReport, models::ErrorBody,
            navigation::Navigation,
        )
    ),
    tags(
        (name = "employee-portal", description = "Employee Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single container of shared services, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for employee records.
    pub repo: RepositoryState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces the marker on the employee API. Extracting `AuthUser` rejects with 401 before
/// the handler runs when no marker cookie is present.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// navigation_guard
///
/// Pre-navigation hook for page routes. Runs the guard against the request's marker and
/// either lets the transition through or redirects.
async fn navigation_guard(marker: AuthMarker, request: Request, next: Next) -> Response {
    match navigation::guard(request.uri().path(), &marker) {
        NavigationOutcome::Proceed => next.run(request).await,
        NavigationOutcome::RedirectTo(target) => Redirect::to(target).into_response(),
    }
}

/// create_router
///
/// Assembles the routing structure, applies the scoped middleware and the observability
/// stack, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        // Page Routes: every transition passes the navigation guard first.
        .merge(pages::page_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            navigation_guard,
        )))
        // Employee API: 401 without a marker.
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span with method, uri and the `x-request-id` set above, so
/// every log line for one request shares an id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
