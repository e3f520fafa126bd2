//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting engine and internal errors to appropriate HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calorie_calc_shared::{
    ErrorResponse, EstimationError, MacroOverflowError, ValidationError,
};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Macro overflow: {0}")]
    MacroOverflow(#[from] MacroOverflowError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<EstimationError> for ApiError {
    fn from(err: EstimationError) -> Self {
        match err {
            EstimationError::Validation(e) => ApiError::Validation(e),
            EstimationError::MacroOverflow(e) => ApiError::MacroOverflow(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::from(&EstimationError::Validation(e)),
            ),
            ApiError::MacroOverflow(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::from(&EstimationError::MacroOverflow(e)),
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", msg))
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
