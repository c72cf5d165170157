//! Inventory domain module.
//!
//! This crate contains business rules for the product catalog and the stock
//! ledger, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod ledger;
pub mod product;

pub use ledger::{
    ChangeKind, StockLog, StockLogEntry, adjust_quantity, record, remove_product, upsert_product,
};
pub use product::{Product, ProductBook};
