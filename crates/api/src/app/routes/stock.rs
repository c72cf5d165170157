use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::Local;

use packtrack_inventory::{ChangeKind, adjust_quantity, record};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub async fn stock_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::StockInRequest>,
) -> axum::response::Response {
    let (Some(barcode), Some(raw_quantity)) = (
        body.barcode.as_deref().filter(|b| !b.is_empty()),
        body.quantity.as_ref(),
    ) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "barcode and quantity are required",
        );
    };

    let mut book = match services.load_products() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };

    if !book.contains_key(barcode) {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
    }

    let Some(quantity) = raw_quantity.as_i64().filter(|q| *q > 0) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "quantity must be a number greater than 0",
        );
    };

    let (new_quantity, entry) =
        match adjust_quantity(&mut book, barcode, quantity, ChangeKind::StockIn, Local::now()) {
            Ok(result) => result,
            Err(err) => return errors::domain_error_to_response(err),
        };

    if let Err(err) = services.save_products(&book) {
        return errors::store_error_to_response(err);
    }

    let mut log = match services.load_stock_log() {
        Ok(log) => log,
        Err(err) => return errors::store_error_to_response(err),
    };
    record(&mut log, entry);
    if let Err(err) = services.save_stock_log(&log) {
        return errors::store_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("received {quantity} unit(s) into stock"),
            "barcode": barcode,
            "new_quantity": new_quantity,
        })),
    )
        .into_response()
}
