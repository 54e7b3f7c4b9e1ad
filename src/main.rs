use employee_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{InMemoryRepository, RepositoryState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, installs logging, assembles the state and serves the router.
#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "employee_portal=debug,tower_http=info".into());

    // Pretty output for local work, JSON lines for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    let bind_addr = config.bind_addr.clone();

    let app = create_router(AppState { repo, config });

    let listener = TcpListener::bind(bind_addr.as_str())
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
