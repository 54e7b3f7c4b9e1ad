use crate::{
    AppState,
    auth::{AuthMarker, AuthUser},
    csv_codec::{self, CsvExport},
    error::{ApiError, ApiResult},
    models::{Employee, ErrorBody, ExportQuery, ImportPreview, ImportReport, NavigationQuery},
    navigation::{self, Navigation, RouteTarget},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;

// --- Page Handlers ---

/// render_page
///
/// [Page Route] Answers every path in the route table. The navigation guard has already
/// run by the time this executes, so the only work left is the table's own redirect or
/// the page descriptor the SPA mounts.
pub async fn render_page(uri: Uri) -> Response {
    let Some(resolved) = navigation::resolve(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match resolved.route.target {
        RouteTarget::Redirect(target) => Redirect::to(target).into_response(),
        RouteTarget::Page(page) => Json(resolved.view_of(page)).into_response(),
    }
}

/// get_navigation
///
/// [Public Route] Resolves where a navigation to `to` ends up for the caller's marker,
/// following every redirect. Lets the SPA decide client-side without a page round trip.
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses((status = 200, description = "Final destination", body = Navigation))
)]
pub async fn get_navigation(
    marker: AuthMarker,
    Query(query): Query<NavigationQuery>,
) -> Json<Navigation> {
    Json(navigation::navigate(&query.to, &marker))
}

// --- Employee API Handlers ---

/// list_employees
///
/// [Authenticated Route] Lists every stored employee.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employees", body = [Employee]),
        (status = 401, description = "No authentication marker", body = ErrorBody)
    )
)]
pub async fn list_employees(_user: AuthUser, State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.repo.list_employees().await)
}

/// get_employee
///
/// [Authenticated Route] Retrieves a single stored employee for the profile views.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Found", body = Employee),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_employee(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Employee>> {
    state
        .repo
        .get_employee(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// export_employees
///
/// [Authenticated Route] Downloads every stored employee as `<file_name>.csv`. Without a
/// `file_name`, the configured base name plus today's date is used.
#[utoipa::path(
    get,
    path = "/api/employees/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "CSV download", body = String, content_type = "text/csv"),
        (status = 401, description = "No authentication marker", body = ErrorBody)
    )
)]
pub async fn export_employees(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> CsvExport {
    let file_name = query
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "{}-{}",
                state.config.export_file_name,
                Local::now().format("%Y-%m-%d")
            )
        });

    let employees = state.repo.list_employees().await;
    csv_codec::export_to_csv(&employees, &file_name)
}

/// preview_import
///
/// [Authenticated Route] Parses an uploaded CSV body and reports every validation problem
/// without storing anything. Structural problems fail the request with 400.
#[utoipa::path(
    post,
    path = "/api/employees/import/preview",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Parsed rows and validation messages", body = ImportPreview),
        (status = 400, description = "Malformed CSV", body = ErrorBody)
    )
)]
pub async fn preview_import(_user: AuthUser, body: String) -> ApiResult<Json<ImportPreview>> {
    let employees = csv_codec::parse_csv(&body)?;
    let errors = csv_codec::validate_csv_format(&employees);

    Ok(Json(ImportPreview { employees, errors }))
}

/// import_employees
///
/// [Authenticated Route] Parses, validates and stores an uploaded CSV batch.
/// The batch is all-or-nothing: any validation message rejects it with 422.
#[utoipa::path(
    post,
    path = "/api/employees/import",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 201, description = "Imported", body = ImportReport),
        (status = 400, description = "Malformed CSV", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn import_employees(
    _user: AuthUser,
    State(state): State<AppState>,
    body: String,
) -> ApiResult<(StatusCode, Json<ImportReport>)> {
    let employees = csv_codec::parse_csv(&body)?;

    let errors = csv_codec::validate_csv_format(&employees);
    if !errors.is_empty() {
        tracing::warn!(violations = errors.len(), "rejected CSV import");
        return Err(ApiError::Validation(errors));
    }

    let employees = state.repo.create_employees(employees).await;
    tracing::info!(imported = employees.len(), "imported employees from CSV");

    Ok((
        StatusCode::CREATED,
        Json(ImportReport {
            imported: employees.len(),
            employees,
        }),
    ))
}
