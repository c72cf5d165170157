use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use packtrack_core::DomainError;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/add_user", post(add_user))
        .route("/change_password", post(change_password))
}

pub async fn add_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddUserRequest>,
) -> axum::response::Response {
    let mut users = match services.load_users() {
        Ok(users) => users,
        Err(err) => return errors::store_error_to_response(err),
    };

    if let Err(err) = packtrack_auth::add_user(&mut users, &body.new_username, &body.new_password) {
        return errors::domain_error_to_response(err);
    }

    if let Err(err) = services.save_users(&users) {
        return errors::store_error_to_response(err);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("user '{}' created", body.new_username.trim()),
        })),
    )
        .into_response()
}

/// Rotates the password of the authenticated user, never anyone else's.
pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    let mut users = match services.load_users() {
        Ok(users) => users,
        Err(err) => return errors::store_error_to_response(err),
    };

    match packtrack_auth::change_password(
        &mut users,
        auth.username(),
        &body.current_password,
        &body.new_password,
    ) {
        Ok(()) => {}
        Err(DomainError::Forbidden) => {
            return errors::json_error(
                StatusCode::FORBIDDEN,
                "forbidden",
                "current password is incorrect",
            );
        }
        Err(err) => return errors::domain_error_to_response(err),
    }

    if let Err(err) = services.save_users(&users) {
        return errors::store_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "password changed" })),
    )
        .into_response()
}
