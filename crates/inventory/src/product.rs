use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog entry. The barcode is the key of the surrounding [`ProductBook`],
/// not a field of the entry itself, mirroring the persisted document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: i64,
}

/// Whole-document product catalog, keyed by barcode.
///
/// An ordered map keeps the serialized document stable across rewrites.
pub type ProductBook = BTreeMap<String, Product>;
