use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Company, LedgerEntry, Product, SummaryPeriod};

/// A ledger entry joined with its product and company snapshots, as returned
/// by the transaction operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub transaction: LedgerEntry,
    pub product: Product,
    pub company: Company,
}

/// Response of the quick cash-entry (sale) operation: the recorded entry
/// plus the product's post-sale stock level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashEntryReceipt {
    #[serde(flatten)]
    pub transaction: TransactionView,
    pub new_stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            meta: PageMeta {
                total,
                per_page,
                current_page: page,
                last_page,
            },
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_entradas: Cents,
    /// Equal to `total_entradas`: the balance is a revenue-only view, no
    /// expense subtraction is wired.
    pub saldo: Cents,
    /// Count of scanned entries regardless of direction.
    pub total_transactions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: Product,
    pub total_quantity: i64,
}

/// The cash-flow summary for one company over one reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub period: SummaryPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub summary: SummaryTotals,
    /// Amounts grouped by payment method over all scanned entries, both
    /// directions.
    pub payment_methods: HashMap<String, Cents>,
    pub top_products: Vec<TopProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_last_page() {
        let page: Page<i32> = Page::new(vec![], 45, 1, 20);
        assert_eq!(page.meta.last_page, 3);

        let exact: Page<i32> = Page::new(vec![], 40, 2, 20);
        assert_eq!(exact.meta.last_page, 2);

        let empty: Page<i32> = Page::new(vec![], 0, 1, 20);
        assert_eq!(empty.meta.last_page, 1);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let totals = SummaryTotals {
            total_entradas: 5000,
            saldo: 5000,
            total_transactions: 2,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["totalEntradas"], 5000);
        assert_eq!(json["saldo"], 5000);
        assert_eq!(json["totalTransactions"], 2);
    }
}
