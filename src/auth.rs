use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{Arc, PoisonError, RwLock},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::{config::AppConfig, error::ApiError};

/// AuthStatusProvider
///
/// The seam between the navigation guard and wherever the authentication marker lives.
/// Only the marker's presence matters; its content is opaque. An empty marker counts as
/// absent, the same as a missing one.
pub trait AuthStatusProvider {
    /// The raw marker, if one is stored.
    fn auth_marker(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.auth_marker().is_some_and(|marker| !marker.is_empty())
    }
}

/// LocalMarkerStore
///
/// A process-wide string key-value store with the marker kept under a fixed key.
/// Clones share the same underlying map, so a login flow holding one handle and the
/// guard holding another observe the same state.
#[derive(Clone, Debug)]
pub struct LocalMarkerStore {
    items: Arc<RwLock<HashMap<String, String>>>,
    marker_key: String,
}

impl LocalMarkerStore {
    pub fn new(marker_key: impl Into<String>) -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            marker_key: marker_key.into(),
        }
    }

    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove_item(&self, key: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl Default for LocalMarkerStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_AUTH_MARKER_KEY)
    }
}

impl AuthStatusProvider for LocalMarkerStore {
    fn auth_marker(&self) -> Option<String> {
        self.get_item(&self.marker_key)
    }
}

/// AuthMarker
///
/// The marker as carried by an HTTP request: the cookie named by
/// `AppConfig::auth_marker_key`. Extraction never fails; a missing cookie is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthMarker(pub Option<String>);

impl AuthStatusProvider for AuthMarker {
    fn auth_marker(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<S> FromRequestParts<S> for AuthMarker
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let marker = jar
            .get(&config.auth_marker_key)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        Ok(AuthMarker(marker))
    }
}

/// AuthUser
///
/// Resolved identity for the employee API. Rejects with 401 when no marker is present.
/// This is a client-side convenience check only: the marker is not verified.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub marker: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthMarker(marker) = match AuthMarker::from_request_parts(parts, state).await {
            Ok(marker) => marker,
            Err(never) => match never {},
        };

        marker
            .map(|marker| AuthUser { marker })
            .ok_or(ApiError::Unauthorized)
    }
}
