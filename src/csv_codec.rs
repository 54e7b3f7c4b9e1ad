use std::{path::Path, sync::LazyLock};

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use regex::Regex;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::models::Employee;

/// Column labels written on export, in column order.
pub const HEADER_LABELS: [&str; 7] = [
    "Code",
    "First Name",
    "Last Name",
    "Occupation",
    "Department",
    "Employment Date",
    "Termination Date",
];

/// Lower-cased column names looked up on import. Same order as [`HEADER_LABELS`].
pub const EXPECTED_HEADERS: [&str; 7] = [
    "code",
    "first name",
    "last name",
    "occupation",
    "department",
    "employment date",
    "termination date",
];

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static EMPLOYEE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^EMP[0-9]{3}$").expect("Invalid employee code regex"));

/// FormatError
///
/// The CSV text does not have the expected shape. Parsing stops at the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("File is empty or missing data rows")]
    MissingData,
    #[error(
        "Invalid CSV headers. Expected: Code, First Name, Last Name, Occupation, Department, Employment Date, Termination Date"
    )]
    InvalidHeaders { missing: Vec<&'static str> },
    #[error("Row {row}: Invalid number of columns")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// CsvReadError
///
/// Failure while reading CSV content from a file or stream before or during parsing.
#[derive(Debug, Error)]
pub enum CsvReadError {
    #[error("failed to read CSV content: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// CsvExport
///
/// A rendered CSV document ready to be handed to the client as a file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Full download name, including the `.csv` extension.
    pub file_name: String,
    pub contents: String,
}

impl IntoResponse for CsvExport {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.contents,
        )
            .into_response()
    }
}

/// export_to_csv
///
/// Renders `employees` under the fixed seven-column header and names the download
/// `<file_name>.csv`. Values are written verbatim: a comma inside a field shifts the
/// remaining columns, and no quoting is attempted.
pub fn export_to_csv(employees: &[Employee], file_name: &str) -> CsvExport {
    tracing::info!(rows = employees.len(), file_name, "exporting employees to CSV");

    CsvExport {
        file_name: format!("{file_name}.csv"),
        contents: render_csv(employees),
    }
}

/// The CSV text alone: header line, then one line per employee, `\n`-joined.
pub fn render_csv(employees: &[Employee]) -> String {
    let mut lines = Vec::with_capacity(employees.len() + 1);
    lines.push(HEADER_LABELS.join(","));

    for employee in employees {
        let row = [
            employee.code.as_str(),
            employee.first_name.as_str(),
            employee.last_name.as_str(),
            employee.occupation.as_str(),
            employee.department.as_str(),
            employee.employment_date.as_str(),
            employee.termination_date.as_deref().unwrap_or(""),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// parse_csv
///
/// Parses CSV text into employees, in input row order. Blank lines are skipped. Columns
/// are found by (lower-cased) header name, so extra or reordered columns are fine, but
/// every row must have exactly as many values as the header has names.
pub fn parse_csv(contents: &str) -> Result<Vec<Employee>, FormatError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let lines: Vec<&str> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(FormatError::MissingData);
    };
    if data_lines.is_empty() {
        return Err(FormatError::MissingData);
    }

    let header_line = header_line.to_lowercase();
    let headers: Vec<&str> = header_line.split(',').collect();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut employees = Vec::with_capacity(data_lines.len());
    for (index, line) in data_lines.iter().enumerate() {
        let values: Vec<&str> = line.split(',').map(str::trim).collect();

        if values.len() != headers.len() {
            // The header is line 1, so the first data line reports as row 2.
            return Err(FormatError::ColumnCount {
                row: index + 2,
                expected: headers.len(),
                found: values.len(),
            });
        }

        employees.push(columns.employee(&values));
    }

    tracing::debug!(rows = employees.len(), "parsed employee CSV");
    Ok(employees)
}

/// read_csv
///
/// Reads `reader` to the end, then parses the text with [`parse_csv`].
pub async fn read_csv<R>(mut reader: R) -> Result<Vec<Employee>, CsvReadError>
where
    R: AsyncRead + Unpin,
{
    let mut contents = String::new();
    reader.read_to_string(&mut contents).await?;
    Ok(parse_csv(&contents)?)
}

/// Reads and parses the CSV file at `path`.
pub async fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<Employee>, CsvReadError> {
    let file = tokio::fs::File::open(path).await?;
    read_csv(file).await
}

/// validate_csv_format
///
/// Checks every employee against the field rules and returns one message per violation,
/// in list order and then rule order. Row numbers count the header, so index 0 is row 2.
/// The termination date is never checked.
pub fn validate_csv_format(employees: &[Employee]) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, employee) in employees.iter().enumerate() {
        let row = index + 2;

        if !EMPLOYEE_CODE.is_match(&employee.code) {
            errors.push(format!("Row {row}: Invalid employee code format"));
        }

        let required = [
            (&employee.first_name, "first name"),
            (&employee.last_name, "last name"),
            (&employee.occupation, "occupation"),
            (&employee.department, "department"),
            (&employee.employment_date, "employment date"),
        ];
        for (value, field) in required {
            if value.trim().is_empty() {
                errors.push(format!("Row {row}: Missing {field}"));
            }
        }
    }

    errors
}

/// Position of each expected column within a particular header line.
struct ColumnIndex {
    positions: [usize; 7],
}

impl ColumnIndex {
    fn from_headers(headers: &[&str]) -> Result<Self, FormatError> {
        let mut positions = [0; 7];
        let mut missing = Vec::new();

        for (slot, expected) in positions.iter_mut().zip(EXPECTED_HEADERS) {
            match headers.iter().position(|header| *header == expected) {
                Some(position) => *slot = position,
                None => missing.push(expected),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            tracing::warn!(?missing, "CSV header is missing expected columns");
            Err(FormatError::InvalidHeaders { missing })
        }
    }

    fn employee(&self, values: &[&str]) -> Employee {
        let [code, first_name, last_name, occupation, department, employment_date, termination_date] =
            self.positions.map(|position| values[position].to_string());

        Employee {
            id: None,
            code,
            first_name,
            last_name,
            occupation,
            department,
            employment_date,
            termination_date: Some(termination_date).filter(|date| !date.is_empty()),
        }
    }
}
