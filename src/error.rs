use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{csv_codec::FormatError, models::ErrorBody};

/// Result type for the employee API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("employee not found")]
    NotFound,
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("CSV data failed validation")]
    Validation(Vec<String>),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Format(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            ApiError::Validation(messages) => messages,
            _ => Vec::new(),
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
