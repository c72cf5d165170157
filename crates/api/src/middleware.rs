use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum::extract::State;

use packtrack_auth::SessionManager;

use crate::context::AuthContext;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "packtrack_session";

#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionManager>,
}

pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_session_token(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let username = state
        .sessions
        .resolve(&token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(AuthContext::new(username));

    Ok(next.run(req).await)
}

/// Pull the session token out of the `Cookie` header(s), if present.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(axum::http::header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };

        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() != Some(SESSION_COOKIE) {
                continue;
            }
            match parts.next() {
                Some(token) if !token.is_empty() => return Some(token.to_string()),
                _ => {}
            }
        }
    }

    None
}
