use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Session;
use crate::state::AppState;

/// Resolves the optional session for every request.
///
/// A valid bearer token inserts a [`Session`] into the request extensions.
/// Missing or invalid tokens are not rejected here: each operation decides
/// what an absent session means, so unauthenticated calls still reach the
/// handler and get the operation's own 401.
pub async fn session_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(session) = resolve_session(&state, &headers) {
        request.extensions_mut().insert(session);
    }

    next.run(request).await
}

fn resolve_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = match extract_jwt_from_headers(headers) {
        Ok(token) => token,
        Err(msg) => {
            tracing::debug!("No session: {}", msg);
            return None;
        }
    };

    match state.jwt.verify(&token) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!("No session: {}", e);
            None
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn non_bearer_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn missing_header_is_reported() {
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
    }
}
