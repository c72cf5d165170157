use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::Local;

use packtrack_core::DomainError;
use packtrack_inventory::{record, remove_product, upsert_product};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(save_product))
        .route("/:barcode", delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.load_products() {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

/// Inventory listing; same document as the product list, kept as its own
/// endpoint.
pub async fn inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    list_products(Extension(services)).await
}

pub async fn save_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SaveProductRequest>,
) -> axum::response::Response {
    // An absent or blank original barcode both mean "create".
    let original = body
        .original_barcode
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    let mut book = match services.load_products() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };

    let entry = match upsert_product(&mut book, original, &body.barcode, &body.name, Local::now()) {
        Ok(entry) => entry,
        Err(err) => return errors::domain_error_to_response(err),
    };

    if let Err(err) = services.save_products(&book) {
        return errors::store_error_to_response(err);
    }

    // Only first creation is logged; renames leave the ledger untouched.
    if let Some(entry) = entry {
        let mut log = match services.load_stock_log() {
            Ok(log) => log,
            Err(err) => return errors::store_error_to_response(err),
        };
        record(&mut log, entry);
        if let Err(err) = services.save_stock_log(&log) {
            return errors::store_error_to_response(err);
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "product saved" })),
    )
        .into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(barcode): Path<String>,
) -> axum::response::Response {
    let mut book = match services.load_products() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };

    match remove_product(&mut book, &barcode) {
        Ok(_) => {}
        Err(DomainError::NotFound) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
        }
        Err(err) => return errors::domain_error_to_response(err),
    }

    if let Err(err) = services.save_products(&book) {
        return errors::store_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "product deleted" })),
    )
        .into_response()
}

pub async fn check_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(barcode): Path<String>,
) -> axum::response::Response {
    let book = match services.load_products() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };

    match book.get(&barcode) {
        Some(product) => (StatusCode::OK, Json(product.clone())).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}
