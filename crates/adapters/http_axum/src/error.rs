//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced as HTTP status codes.
///
/// Diagram failures travel inside the [`DiagramResponse`] envelope with
/// HTTP 200; this type only covers the adapter's own faults.
///
/// [`DiagramResponse`]: autoviz_domain::diagram::DiagramResponse
#[derive(Debug)]
pub enum ApiError {
    /// The background refresh loop has stopped.
    RefreshUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::RefreshUnavailable => {
                tracing::error!("refresh loop is not running");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "refresh loop is not running".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
