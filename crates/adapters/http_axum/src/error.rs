//! HTTP error response mapping.
//!
//! Every failure leaves the API in one of three envelopes:
//! `{"errors": [...]}` (400), `{"error": "..."}` (404) or a generic
//! `{"error": "..."}` (500) that never carries storage details.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use catalog_domain::error::CatalogError;

use crate::validation::Violation;

const INTERNAL_ERROR: &str = "Error interno del servidor";

/// JSON error body returned for single-message failures.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON error body returned for rule violations.
#[derive(Serialize)]
struct ErrorsBody {
    errors: Vec<Violation>,
}

/// Build the `400` response for a list of violations.
pub(crate) fn violations_response(errors: Vec<Violation>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
}

/// Maps [`CatalogError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CatalogError::Validation(err) => violations_response(vec![Violation::from(err)]),
            CatalogError::NotFound(err) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            CatalogError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: INTERNAL_ERROR.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
