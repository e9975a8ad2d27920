use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::any::Any;

/// Errors the HTTP layer renders itself, outside of check outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not authorized")]
    NotAuthorized,

    #[error("not found")]
    NotFound,

    #[error("https required")]
    HttpsRequired,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotAuthorized => {
                let mut response =
                    json_response(StatusCode::UNAUTHORIZED, json!({ "error": "not authorized" }));
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(r#"Basic realm="Restricted Area""#),
                );
                response
            }
            ApiError::NotFound => {
                json_response(StatusCode::NOT_FOUND, json!({ "error": "not found" }))
            }
            ApiError::HttpsRequired => {
                json_response(StatusCode::BAD_REQUEST, json!({ "error": "https required" }))
            }
        }
    }
}

/// JSON body terminated by a newline, the format every endpoint uses.
pub fn json_response(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        format!("{}\n", body),
    )
        .into_response()
}

pub fn internal_error() -> Response {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "internal server error" }),
    )
}

/// Used by the panic recovery layer.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Request handler panicked");
    internal_error()
}
