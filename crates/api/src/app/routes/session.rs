use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use packtrack_auth::verify_login;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthContext;
use crate::middleware::{SESSION_COOKIE, extract_session_token};

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let users = match services.load_users() {
        Ok(users) => users,
        Err(err) => return errors::store_error_to_response(err),
    };

    // One generic signal for unknown user and wrong password alike.
    if !verify_login(&users, &body.username, &body.password) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "invalid_credentials",
            "invalid username or password",
        );
    }

    let token = services.sessions().open(&body.username);
    let cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({
            "message": "login successful",
            "username": body.username,
        })),
    )
        .into_response()
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Some(token) = extract_session_token(&headers) {
        services.sessions().close(&token);
    }

    let cookie = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "logged out" })),
    )
        .into_response()
}

pub async fn whoami(Extension(auth): Extension<AuthContext>) -> impl IntoResponse {
    Json(serde_json::json!({ "username": auth.username() }))
}
