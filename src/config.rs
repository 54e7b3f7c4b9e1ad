use std::env;

/// AppConfig
///
/// Holds the application's configuration state. Loaded once at startup and then shared,
/// immutable, through `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and which variables are mandatory.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Cookie name holding the authentication marker (the SPA stores it under "user").
    pub auth_marker_key: String,
    // Base name for CSV downloads when the caller does not supply one.
    pub export_file_name: String,
}

/// Env
///
/// Defines the runtime context: local development or a production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_AUTH_MARKER_KEY: &str = "user";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "employees";

impl Default for AppConfig {
    /// Safe, non-panicking values for test state setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            auth_marker_key: DEFAULT_AUTH_MARKER_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in `Env::Production` when `BIND_ADDR` is not set, so a deployment never
    /// silently listens on the development default.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = match env {
            Env::Production => {
                env::var("BIND_ADDR").expect("FATAL: BIND_ADDR must be set in production.")
            }
            Env::Local => env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        };

        // An empty key would match no cookie at all and lock every user out.
        let auth_marker_key = env::var("AUTH_MARKER_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_MARKER_KEY.to_string());

        let export_file_name = env::var("EXPORT_FILE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string());

        Self {
            env,
            bind_addr,
            auth_marker_key,
            export_file_name,
        }
    }
}
