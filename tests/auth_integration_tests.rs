use axum::{
    extract::FromRequestParts,
    http::{Request, StatusCode, header, request::Parts},
    response::IntoResponse,
};
use employee_portal::{
    AppConfig,
    auth::{AuthMarker, AuthStatusProvider, AuthUser, LocalMarkerStore},
    error::ApiError,
};

// --- Helpers ---

fn parts_with_cookie(cookie: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/employees");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    parts
}

async fn extract_marker(cookie: Option<&str>, config: &AppConfig) -> AuthMarker {
    let mut parts = parts_with_cookie(cookie);
    match AuthMarker::from_request_parts(&mut parts, config).await {
        Ok(marker) => marker,
        Err(never) => match never {},
    }
}

// --- AuthMarker Extraction ---

#[tokio::test]
async fn test_marker_read_from_configured_cookie() {
    let config = AppConfig::default();

    let marker = extract_marker(Some("theme=dark; user=ann-token"), &config).await;

    assert_eq!(marker, AuthMarker(Some("ann-token".to_string())));
    assert!(marker.is_authenticated());
}

#[tokio::test]
async fn test_missing_cookie_is_no_marker() {
    let config = AppConfig::default();

    let marker = extract_marker(None, &config).await;
    assert_eq!(marker, AuthMarker(None));
    assert!(!marker.is_authenticated());

    let other = extract_marker(Some("theme=dark"), &config).await;
    assert_eq!(other, AuthMarker(None));
}

#[tokio::test]
async fn test_empty_cookie_is_no_marker() {
    let marker = extract_marker(Some("user="), &AppConfig::default()).await;

    assert_eq!(marker, AuthMarker(None));
}

#[tokio::test]
async fn test_custom_marker_key() {
    let config = AppConfig {
        auth_marker_key: "session".to_string(),
        ..AppConfig::default()
    };

    assert_eq!(extract_marker(Some("user=ann"), &config).await, AuthMarker(None));
    assert_eq!(
        extract_marker(Some("session=ann"), &config).await,
        AuthMarker(Some("ann".to_string()))
    );
}

// --- AuthUser Extraction ---

#[tokio::test]
async fn test_auth_user_resolves_marker() {
    let mut parts = parts_with_cookie(Some("user=token-123"));

    let user = AuthUser::from_request_parts(&mut parts, &AppConfig::default())
        .await
        .unwrap();

    assert_eq!(user.marker, "token-123");
}

#[tokio::test]
async fn test_auth_user_rejects_without_marker() {
    let mut parts = parts_with_cookie(None);

    let rejection = AuthUser::from_request_parts(&mut parts, &AppConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(rejection, ApiError::Unauthorized));
    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}

// --- LocalMarkerStore ---

#[test]
fn test_local_store_items() {
    let store = LocalMarkerStore::new("user");
    assert_eq!(store.marker_key(), "user");
    assert_eq!(store.get_item("user"), None);

    store.set_item("user", "ann");
    store.set_item("theme", "dark");
    assert_eq!(store.auth_marker(), Some("ann".to_string()));
    assert_eq!(store.get_item("theme"), Some("dark".to_string()));

    store.remove_item("user");
    assert_eq!(store.auth_marker(), None);
    assert_eq!(store.get_item("theme"), Some("dark".to_string()));
}

#[test]
fn test_local_store_clones_share_state() {
    let login_flow = LocalMarkerStore::default();
    let guard_view = login_flow.clone();

    login_flow.set_item("user", "ann");

    assert!(guard_view.is_authenticated());
}
