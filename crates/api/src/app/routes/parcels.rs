use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Extension, Multipart, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::Local;

use packtrack_inventory::record;
use packtrack_parcels::{Parcel, ScannedItem, pack_items, video_filename};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Upload cap for the multipart packing request.
pub const MAX_VIDEO_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_parcels))
        .route("/:transport_barcode", delete(delete_parcel))
}

pub async fn upload_pack_video(
    Extension(services): Extension<Arc<AppServices>>,
    mut multipart: Multipart,
) -> axum::response::Response {
    let mut video: Option<(Option<String>, axum::body::Bytes)> = None;
    let mut transport_barcode: Option<String> = None;
    let mut scanned_raw: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("malformed multipart body: {err}"),
                );
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("video") => {
                let file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => video = Some((file_name, bytes)),
                    Err(err) => {
                        return errors::json_error(
                            StatusCode::BAD_REQUEST,
                            "validation_error",
                            format!("failed to read video field: {err}"),
                        );
                    }
                }
            }
            Some("transport_barcode") => match field.text().await {
                Ok(text) => transport_barcode = Some(text),
                Err(err) => {
                    return errors::json_error(
                        StatusCode::BAD_REQUEST,
                        "validation_error",
                        format!("failed to read transport_barcode field: {err}"),
                    );
                }
            },
            Some("scanned_items") => match field.text().await {
                Ok(text) => scanned_raw = Some(text),
                Err(err) => {
                    return errors::json_error(
                        StatusCode::BAD_REQUEST,
                        "validation_error",
                        format!("failed to read scanned_items field: {err}"),
                    );
                }
            },
            _ => {}
        }
    }

    let (Some((file_name, video_bytes)), Some(transport_barcode), Some(scanned_raw)) =
        (video, transport_barcode, scanned_raw)
    else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "video, transport_barcode and scanned_items are required",
        );
    };

    match record_packing(
        &services,
        &transport_barcode,
        file_name.as_deref(),
        &video_bytes,
        &scanned_raw,
    ) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            // Genericized toward the caller; detail stays server-side.
            tracing::error!("packing upload failed for '{transport_barcode}': {err:#}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error",
            )
        }
    }
}

/// The packing flow: decrement stock, extend the ledger, store the asset,
/// overwrite-insert the parcel record.
fn record_packing(
    services: &AppServices,
    transport_barcode: &str,
    file_name: Option<&str>,
    video: &[u8],
    scanned_raw: &str,
) -> anyhow::Result<dto::PackVideoResponse> {
    let items: Vec<ScannedItem> =
        serde_json::from_str(scanned_raw).context("scanned_items is not valid JSON")?;
    let now = Local::now();

    let mut book = services.load_products()?;
    let outcome = pack_items(&mut book, &items, now);
    services.save_products(&book)?;

    let mut log = services.load_stock_log()?;
    for entry in outcome.entries {
        record(&mut log, entry);
    }
    services.save_stock_log(&log)?;

    let ext = file_name
        .and_then(|name| std::path::Path::new(name).extension().and_then(|e| e.to_str()))
        .unwrap_or("mp4");
    let filename = video_filename(transport_barcode, now, ext);
    std::fs::write(services.uploads_dir().join(&filename), video)
        .context("failed to store video asset")?;

    let mut parcels = services.load_parcels()?;
    parcels.insert(
        transport_barcode.to_string(),
        Parcel {
            video_filename: filename.clone(),
            scanned_products: items,
            timestamp: now,
        },
    );
    services.save_parcels(&parcels)?;

    Ok(dto::PackVideoResponse {
        status: "success",
        filename,
        skipped: outcome.skipped,
    })
}

pub async fn list_parcels(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.load_parcels() {
        Ok(book) => (StatusCode::OK, Json(dto::parcel_views(&book))).into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

pub async fn delete_parcel(
    Extension(services): Extension<Arc<AppServices>>,
    Path(transport_barcode): Path<String>,
) -> axum::response::Response {
    let mut parcels = match services.load_parcels() {
        Ok(book) => book,
        Err(err) => return errors::store_error_to_response(err),
    };

    let Some(parcel) = parcels.remove(&transport_barcode) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "parcel not found");
    };

    // Best-effort asset removal: a missing file is fine, anything else is
    // logged but never surfaced.
    let asset = services.uploads_dir().join(&parcel.video_filename);
    if let Err(err) = std::fs::remove_file(&asset) {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("failed to delete video asset {}: {err}", asset.display());
        }
    }

    if let Err(err) = services.save_parcels(&parcels) {
        return errors::store_error_to_response(err);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("parcel '{transport_barcode}' deleted"),
        })),
    )
        .into_response()
}

pub async fn get_video(
    Extension(services): Extension<Arc<AppServices>>,
    Path(filename): Path<String>,
) -> axum::response::Response {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "invalid filename");
    }

    match tokio::fs::read(services.uploads_dir().join(&filename)).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "video/mp4")],
            bytes,
        )
            .into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "video not found")
        }
        Err(err) => {
            tracing::error!("failed to read video asset '{filename}': {err}");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error",
            )
        }
    }
}
