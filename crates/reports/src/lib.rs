//! Report aggregation over the stock ledger.
//!
//! Deterministic scans of the product catalog and the log; "today" is the
//! server-local calendar date, matched as a string prefix against the
//! serialized entry timestamps.

use chrono::NaiveDate;
use serde::Serialize;

use packtrack_inventory::{ChangeKind, ProductBook, StockLogEntry};

/// Dashboard totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Sum of all current product quantities, independent of log history.
    pub total_stock: i64,
    /// Sum of today's positive quantity changes.
    pub today_stock_in: i64,
    /// Absolute sum of today's stock-out quantity changes.
    pub today_stock_out: i64,
}

/// Which slice of the daily log a query asks for. Anything else yields an
/// empty result at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogQuery {
    StockIn,
    StockOut,
}

impl LogQuery {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stock-in" => Some(LogQuery::StockIn),
            "stock-out" => Some(LogQuery::StockOut),
            _ => None,
        }
    }
}

fn on_date(entry: &StockLogEntry, date: &str) -> bool {
    entry.timestamp.to_rfc3339().starts_with(date)
}

pub fn dashboard_summary(
    book: &ProductBook,
    log: &[StockLogEntry],
    today: NaiveDate,
) -> DashboardSummary {
    let date = today.to_string();

    let total_stock = book.values().map(|p| p.quantity).sum();
    let today_stock_in = log
        .iter()
        .filter(|e| on_date(e, &date) && e.quantity_change > 0)
        .map(|e| e.quantity_change)
        .sum();
    let today_stock_out = log
        .iter()
        .filter(|e| on_date(e, &date) && e.kind == ChangeKind::StockOut)
        .map(|e| e.quantity_change)
        .sum::<i64>()
        .abs();

    DashboardSummary {
        total_stock,
        today_stock_in,
        today_stock_out,
    }
}

/// Entries on `date` (a `YYYY-MM-DD` prefix), filtered by query kind:
/// stock-in selects positive quantity changes, stock-out selects entries of
/// that kind. Log order (newest-first) is preserved.
pub fn daily_log(log: &[StockLogEntry], date: &str, query: LogQuery) -> Vec<StockLogEntry> {
    log.iter()
        .filter(|e| on_date(e, date))
        .filter(|e| match query {
            LogQuery::StockIn => e.quantity_change > 0,
            LogQuery::StockOut => e.kind == ChangeKind::StockOut,
        })
        .cloned()
        .collect()
}
