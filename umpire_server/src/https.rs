use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

fn is_https(headers: &HeaderMap) -> bool {
    headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// `https://` location for the same host, path and query.
pub fn https_location(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Some(format!("https://{}{}", host, path))
}

/// Redirects plain-HTTP requests (as reported by the proxy) when HTTPS is forced.
pub async fn enforce_https(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.force_https || is_https(request.headers()) {
        return next.run(request).await;
    }

    match https_location(request.headers(), request.uri()) {
        Some(location) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response(),
        None => ApiError::HttpsRequired.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_location_keeps_path_and_query() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("umpire.example.com"));
        let uri: Uri = "/check?metric=cpu&max=1".parse().unwrap();

        assert_eq!(
            https_location(&headers, &uri).as_deref(),
            Some("https://umpire.example.com/check?metric=cpu&max=1")
        );
    }

    #[test]
    fn test_forwarded_proto() {
        let mut headers = HeaderMap::new();
        assert!(!is_https(&headers));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("HTTPS"));
        assert!(is_https(&headers));
    }
}
