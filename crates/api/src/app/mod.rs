//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: shared state (document stores, sessions, upload dir)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::AppServices::bootstrap(config)?);
    let auth_state = middleware::AuthState {
        sessions: services.sessions().clone(),
    };

    // Protected routes: require a live session; handlers get an AuthContext.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::session_middleware,
        ));

    let open = Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/session/login", post(routes::session::login))
        .layer(Extension(services));

    Ok(open.merge(protected).layer(ServiceBuilder::new()))
}
