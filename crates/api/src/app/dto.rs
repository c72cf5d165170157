use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use packtrack_parcels::{ParcelBook, ScannedItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveProductRequest {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub original_barcode: Option<String>,
}

/// Stock-in body. Both fields are decoded loosely so the handler can answer
/// missing/non-numeric input with a validation error rather than a decode
/// rejection.
#[derive(Debug, Deserialize)]
pub struct StockInRequest {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub new_username: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PackVideoResponse {
    pub status: &'static str,
    pub filename: String,
    /// Barcodes skipped by the pack loop (unknown or out of stock).
    pub skipped: Vec<String>,
}

/// Parcel as listed: the record plus its key.
#[derive(Debug, Serialize)]
pub struct ParcelView {
    pub transport_barcode: String,
    pub video_filename: String,
    pub scanned_products: Vec<ScannedItem>,
    pub timestamp: DateTime<Local>,
}

/// Flatten the parcel book for listing, newest first.
pub fn parcel_views(book: &ParcelBook) -> Vec<ParcelView> {
    let mut views: Vec<ParcelView> = book
        .iter()
        .map(|(transport_barcode, parcel)| ParcelView {
            transport_barcode: transport_barcode.clone(),
            video_filename: parcel.video_filename.clone(),
            scanned_products: parcel.scanned_products.clone(),
            timestamp: parcel.timestamp,
        })
        .collect();
    views.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    views
}
