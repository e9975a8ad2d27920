use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Password from an `Authorization: Basic ...` header. The user name is ignored.
pub fn basic_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (_, password) = credentials.split_once(':')?;
    Some(password.to_string())
}

pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match basic_password(request.headers()) {
        Some(password) if password.as_str() == &*state.api_key => next.run(request).await,
        _ => ApiError::NotAuthorized.into_response(),
    }
}
