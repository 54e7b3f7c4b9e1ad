use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

// --- Core Domain Schema ---

/// Employee
///
/// The only domain entity. Field names are camelCase on the wire to match the SPA's forms.
/// `id` is assigned by the backing store and is absent for records that have not been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    // Must match EMP followed by three digits (see `csv_codec::validate_csv_format`).
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub department: String,
    // Free-form date string; only non-emptiness is checked.
    pub employment_date: String,
    #[serde(default)]
    pub termination_date: Option<String>,
}

// --- Request Parameters ---

/// ExportQuery
///
/// Query parameters for `GET /api/employees/export`.
#[derive(Debug, Clone, Deserialize, IntoParams, Default)]
pub struct ExportQuery {
    /// Base file name without extension; `.csv` is appended.
    pub file_name: Option<String>,
}

/// NavigationQuery
///
/// Query parameters for `GET /api/navigation`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// The path the SPA is about to navigate to.
    pub to: String,
}

// --- Response Payloads ---

/// ImportPreview
///
/// Dry-run result of a CSV upload: everything that parsed, plus every field-level problem.
/// The SPA lists `errors` before letting the user commit the import.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ImportPreview {
    pub employees: Vec<Employee>,
    pub errors: Vec<String>,
}

/// ImportReport
///
/// Result of a committed import: the stored records with their assigned ids.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ImportReport {
    pub imported: usize,
    pub employees: Vec<Employee>,
}

/// ErrorBody
///
/// Uniform JSON error payload. `details` carries per-row validation messages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
