pub mod cities;
pub mod forecast;
pub mod stats;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error envelope shared by all routes.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl ToString,
) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
            details: details.to_string(),
        }),
    )
        .into_response()
}

/// Forward an upstream body verbatim under the given status code.
pub(crate) fn passthrough_response(status_code: u16, body: axum::body::Bytes) -> Response {
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
