use std::collections::HashMap;

use super::{Cents, LedgerEntry, PaymentMethod, TransactionType};

/// Total revenue over a slice of entries: the sum of `amount` over entrada
/// entries only. Saida entries never subtract; the summary is a
/// revenue-only view.
pub fn total_entradas(entries: &[LedgerEntry]) -> Cents {
    entries
        .iter()
        .filter(|e| e.transaction_type == TransactionType::Entrada)
        .map(|e| e.amount)
        .sum()
}

/// Group amounts by payment method over ALL entries, both directions.
/// Intentionally not filtered to entradas: the till report shows how money
/// moved per method, whatever the direction.
pub fn payment_method_totals(entries: &[LedgerEntry]) -> HashMap<PaymentMethod, Cents> {
    let mut totals: HashMap<PaymentMethod, Cents> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.payment_method).or_insert(0) += entry.amount;
    }
    totals
}
