/// Router Module Index
///
/// Splits routing by how access is decided. Page routes go through the navigation
/// guard and redirect; API routes answer 401 instead of redirecting.

/// The single-page app's navigation table, gated by the navigation guard.
pub mod pages;

/// Routes accessible to any client: health check and navigation resolution.
pub mod public;

/// Employee API routes, protected by the `AuthUser` extractor middleware.
pub mod authenticated;
