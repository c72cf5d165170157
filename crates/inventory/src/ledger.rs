use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use packtrack_core::{DomainError, DomainResult};

use crate::product::{Product, ProductBook};

/// Kind of stock movement recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    #[serde(rename = "stock-in")]
    StockIn,
    #[serde(rename = "stock-out")]
    StockOut,
    #[serde(rename = "manual-adjust")]
    ManualAdjust,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::StockIn => "stock-in",
            ChangeKind::StockOut => "stock-out",
            ChangeKind::ManualAdjust => "manual-adjust",
        }
    }
}

/// One immutable ledger entry. `product_name` is a snapshot taken at write
/// time, not a live reference; `new_quantity` is the product quantity
/// immediately after `quantity_change` was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLogEntry {
    pub timestamp: DateTime<Local>,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub barcode: String,
    pub product_name: String,
    pub quantity_change: i64,
    pub new_quantity: i64,
}

/// Whole-document stock ledger, newest entry first.
pub type StockLog = Vec<StockLogEntry>;

/// Prepend an entry. Entries are append-only and ordered newest-first;
/// nothing ever mutates or removes an existing entry.
pub fn record(log: &mut StockLog, entry: StockLogEntry) {
    log.insert(0, entry);
}

/// Apply a quantity delta to an existing product and produce the matching
/// ledger entry. There is no cap on `delta`; positive-only policies live at
/// the call site.
pub fn adjust_quantity(
    book: &mut ProductBook,
    barcode: &str,
    delta: i64,
    kind: ChangeKind,
    at: DateTime<Local>,
) -> DomainResult<(i64, StockLogEntry)> {
    let product = book.get_mut(barcode).ok_or(DomainError::NotFound)?;
    product.quantity += delta;

    let entry = StockLogEntry {
        timestamp: at,
        kind,
        barcode: barcode.to_string(),
        product_name: product.name.clone(),
        quantity_change: delta,
        new_quantity: product.quantity,
    };

    Ok((product.quantity, entry))
}

/// Create a product, or rename/rebarcode an existing one.
///
/// With no `original_barcode` this creates a new product at quantity 0 and
/// returns a zero-change manual-adjust entry for the ledger. With an
/// `original_barcode` it moves the existing quantity to the new barcode/name
/// (removing the old key when it changes) and returns `None`; renames are
/// not logged.
pub fn upsert_product(
    book: &mut ProductBook,
    original_barcode: Option<&str>,
    barcode: &str,
    name: &str,
    at: DateTime<Local>,
) -> DomainResult<Option<StockLogEntry>> {
    let barcode = barcode.trim();
    let name = name.trim();
    if barcode.is_empty() || name.is_empty() {
        return Err(DomainError::validation("barcode and name are required"));
    }

    match original_barcode {
        None => {
            if book.contains_key(barcode) {
                return Err(DomainError::conflict(format!(
                    "barcode '{barcode}' already exists"
                )));
            }
            book.insert(
                barcode.to_string(),
                Product {
                    name: name.to_string(),
                    quantity: 0,
                },
            );
            Ok(Some(StockLogEntry {
                timestamp: at,
                kind: ChangeKind::ManualAdjust,
                barcode: barcode.to_string(),
                product_name: name.to_string(),
                quantity_change: 0,
                new_quantity: 0,
            }))
        }
        Some(original) => {
            if original != barcode && book.contains_key(barcode) {
                return Err(DomainError::conflict(format!(
                    "barcode '{barcode}' collides with another product"
                )));
            }
            let quantity = book.get(original).map(|p| p.quantity).unwrap_or(0);
            if original != barcode {
                book.remove(original);
            }
            book.insert(
                barcode.to_string(),
                Product {
                    name: name.to_string(),
                    quantity,
                },
            );
            Ok(None)
        }
    }
}

/// Remove a product permanently. Deletion is not logged.
pub fn remove_product(book: &mut ProductBook, barcode: &str) -> DomainResult<Product> {
    book.remove(barcode).ok_or(DomainError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    fn book_with(barcode: &str, name: &str, quantity: i64) -> ProductBook {
        let mut book = ProductBook::new();
        book.insert(
            barcode.to_string(),
            Product {
                name: name.to_string(),
                quantity,
            },
        );
        book
    }

    #[test]
    fn adjust_quantity_updates_product_and_snapshots_entry() {
        let mut book = book_with("A001", "Widget", 3);

        let (new_quantity, entry) =
            adjust_quantity(&mut book, "A001", 10, ChangeKind::StockIn, now()).unwrap();

        assert_eq!(new_quantity, 13);
        assert_eq!(book["A001"].quantity, 13);
        assert_eq!(entry.kind, ChangeKind::StockIn);
        assert_eq!(entry.barcode, "A001");
        assert_eq!(entry.product_name, "Widget");
        assert_eq!(entry.quantity_change, 10);
        assert_eq!(entry.new_quantity, 13);
    }

    #[test]
    fn adjust_quantity_unknown_barcode_is_not_found() {
        let mut book = ProductBook::new();
        let result = adjust_quantity(&mut book, "A001", 1, ChangeKind::StockIn, now());
        assert_eq!(result.unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn create_product_starts_at_zero_and_logs_zero_change() {
        let mut book = ProductBook::new();

        let entry = upsert_product(&mut book, None, "A001", "Widget", now())
            .unwrap()
            .expect("creation must produce a ledger entry");

        assert_eq!(book["A001"].quantity, 0);
        assert_eq!(entry.kind, ChangeKind::ManualAdjust);
        assert_eq!(entry.quantity_change, 0);
        assert_eq!(entry.new_quantity, 0);
    }

    #[test]
    fn create_product_rejects_taken_barcode() {
        let mut book = book_with("A001", "Widget", 5);
        let result = upsert_product(&mut book, None, "A001", "Other", now());
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn create_product_rejects_blank_fields() {
        let mut book = ProductBook::new();
        assert!(matches!(
            upsert_product(&mut book, None, "  ", "Widget", now()),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            upsert_product(&mut book, None, "A001", "", now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rebarcode_moves_quantity_and_removes_old_key() {
        let mut book = book_with("A001", "Widget", 7);

        let entry = upsert_product(&mut book, Some("A001"), "B002", "Widget v2", now()).unwrap();

        assert!(entry.is_none(), "renames are not logged");
        assert!(!book.contains_key("A001"));
        assert_eq!(book["B002"].quantity, 7);
        assert_eq!(book["B002"].name, "Widget v2");
    }

    #[test]
    fn rename_in_place_keeps_quantity() {
        let mut book = book_with("A001", "Widget", 4);

        upsert_product(&mut book, Some("A001"), "A001", "Widget Pro", now()).unwrap();

        assert_eq!(book["A001"].quantity, 4);
        assert_eq!(book["A001"].name, "Widget Pro");
    }

    #[test]
    fn rebarcode_rejects_collision_with_other_product() {
        let mut book = book_with("A001", "Widget", 4);
        book.insert(
            "B002".to_string(),
            Product {
                name: "Gadget".to_string(),
                quantity: 1,
            },
        );

        let result = upsert_product(&mut book, Some("A001"), "B002", "Widget", now());
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(book["A001"].quantity, 4, "failed move must not mutate");
    }

    #[test]
    fn rebarcode_with_missing_original_creates_at_zero() {
        let mut book = ProductBook::new();

        let entry = upsert_product(&mut book, Some("GONE"), "A001", "Widget", now()).unwrap();

        assert!(entry.is_none());
        assert_eq!(book["A001"].quantity, 0);
    }

    #[test]
    fn remove_product_is_permanent_and_missing_is_not_found() {
        let mut book = book_with("A001", "Widget", 2);

        let removed = remove_product(&mut book, "A001").unwrap();
        assert_eq!(removed.quantity, 2);
        assert!(book.is_empty());

        assert_eq!(
            remove_product(&mut book, "A001").unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn record_keeps_newest_first() {
        let mut log = StockLog::new();
        let mut book = book_with("A001", "Widget", 0);

        let (_, first) = adjust_quantity(&mut book, "A001", 1, ChangeKind::StockIn, now()).unwrap();
        let (_, second) = adjust_quantity(&mut book, "A001", 2, ChangeKind::StockIn, now()).unwrap();
        record(&mut log, first);
        record(&mut log, second);

        assert_eq!(log[0].quantity_change, 2);
        assert_eq!(log[1].quantity_change, 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: for any sequence of stock-ins, the final quantity is
            /// the initial quantity plus the sum of deltas, with one entry per
            /// operation whose `new_quantity` snapshot matches the running
            /// quantity.
            #[test]
            fn stock_in_sequence_sums(
                initial in 0i64..1_000,
                deltas in proptest::collection::vec(1i64..500, 0..32)
            ) {
                let mut book = ProductBook::new();
                book.insert(
                    "A001".to_string(),
                    Product { name: "Widget".to_string(), quantity: initial },
                );
                let mut log = StockLog::new();

                let mut running = initial;
                for delta in &deltas {
                    let (new_quantity, entry) =
                        adjust_quantity(&mut book, "A001", *delta, ChangeKind::StockIn, Local::now())
                            .unwrap();
                    running += delta;
                    prop_assert_eq!(new_quantity, running);
                    prop_assert_eq!(entry.new_quantity, running);
                    record(&mut log, entry);
                }

                let total: i64 = deltas.iter().sum();
                prop_assert_eq!(book["A001"].quantity, initial + total);
                prop_assert_eq!(log.len(), deltas.len());
            }
        }
    }
}
