use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Local;

use packtrack_inventory::StockLogEntry;
use packtrack_reports::LogQuery;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard_summary", get(dashboard_summary))
        .route("/daily_log", get(daily_log))
}

pub async fn dashboard_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let book = match services.load_products() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };
    let log = match services.load_stock_log() {
        Ok(log) => log,
        Err(err) => return errors::store_error_to_response(err),
    };

    let summary =
        packtrack_reports::dashboard_summary(&book, &log, Local::now().date_naive());

    (StatusCode::OK, Json(summary)).into_response()
}

pub async fn daily_log(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DailyLogQuery>,
) -> axum::response::Response {
    // An unrecognized (or absent) type yields an empty result, not an error.
    let Some(kind) = query.kind.as_deref().and_then(LogQuery::parse) else {
        return (StatusCode::OK, Json(Vec::<StockLogEntry>::new())).into_response();
    };

    let log = match services.load_stock_log() {
        Ok(log) => log,
        Err(err) => return errors::store_error_to_response(err),
    };

    let entries = packtrack_reports::daily_log(&log, &query.date, kind);

    (StatusCode::OK, Json(entries)).into_response()
}
