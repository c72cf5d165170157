use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

pub mod parcels;
pub mod products;
pub mod reports;
pub mod session;
pub mod stock;
pub mod system;
pub mod users;

/// Router for all session-gated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/session/logout", post(session::logout))
        .route("/api/session/whoami", get(session::whoami))
        .nest("/api/products", products::router())
        .route("/api/inventory", get(products::inventory))
        .route("/api/check_item/:barcode", get(products::check_item))
        .route("/api/stock_in", post(stock::stock_in))
        .nest("/api/parcels", parcels::router())
        .route(
            "/api/pack_video",
            post(parcels::upload_pack_video)
                .layer(DefaultBodyLimit::max(parcels::MAX_VIDEO_UPLOAD_BYTES)),
        )
        .route("/uploads/:filename", get(parcels::get_video))
        .nest("/api/reports", reports::router())
        .nest("/api/users", users::router())
}
