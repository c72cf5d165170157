use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use packtrack_inventory::{ChangeKind, ProductBook, StockLogEntry};

/// One scanned product as captured at pack time. The name is a snapshot, not
/// a live catalog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedItem {
    pub barcode: String,
    pub name: String,
}

/// Parcel record. The transport barcode is the key of the surrounding
/// [`ParcelBook`]; a re-pack under the same key overwrites the prior record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub video_filename: String,
    pub scanned_products: Vec<ScannedItem>,
    pub timestamp: DateTime<Local>,
}

/// Whole-document parcel store, keyed by transport barcode.
pub type ParcelBook = BTreeMap<String, Parcel>;

/// Result of running the pack loop over the scanned items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutcome {
    /// Ledger entries for the items that were decremented, in scan order.
    pub entries: Vec<StockLogEntry>,
    /// Barcodes that were skipped (unknown, or already at zero quantity).
    pub skipped: Vec<String>,
}

/// Decrement stock for every scanned item that exists with quantity > 0,
/// one unit per occurrence. Items not found or already at zero are skipped;
/// the skip never fails the parcel and produces no ledger entry.
pub fn pack_items(book: &mut ProductBook, items: &[ScannedItem], at: DateTime<Local>) -> PackOutcome {
    let mut outcome = PackOutcome::default();

    for item in items {
        match book.get_mut(&item.barcode) {
            Some(product) if product.quantity > 0 => {
                product.quantity -= 1;
                outcome.entries.push(StockLogEntry {
                    timestamp: at,
                    kind: ChangeKind::StockOut,
                    barcode: item.barcode.clone(),
                    product_name: product.name.clone(),
                    quantity_change: -1,
                    new_quantity: product.quantity,
                });
            }
            _ => outcome.skipped.push(item.barcode.clone()),
        }
    }

    outcome
}

/// Deterministic stored name for an uploaded packing video. Second
/// granularity; a same-second re-upload for the same transport barcode
/// produces the same name and overwrites.
pub fn video_filename(transport_barcode: &str, at: DateTime<Local>, ext: &str) -> String {
    format!("{}_{}.{}", transport_barcode, at.format("%Y%m%d_%H%M%S"), ext)
}
