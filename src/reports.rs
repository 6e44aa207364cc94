use crate::models::{BalancedRow, ShopSummary, Transaction};

// ---------------------------------------------------------------------------
// Shop summary
// ---------------------------------------------------------------------------

/// Distinct shop names in first-appearance order. Names are not normalized:
/// case and whitespace variants are distinct shops.
pub fn shops(txns: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in txns {
        if !out.iter().any(|s| s == &t.shop) {
            out.push(t.shop.clone());
        }
    }
    out
}

/// Per-shop total due (credits minus debits), one entry per distinct shop in
/// first-appearance order.
pub fn summarize(txns: &[Transaction]) -> Vec<ShopSummary> {
    shops(txns)
        .into_iter()
        .map(|shop| {
            let total_due = txns
                .iter()
                .filter(|t| t.shop == shop)
                .map(Transaction::signed_amount)
                .sum();
            ShopSummary { shop, total_due }
        })
        .collect()
}

/// Headline figure: the sum of every shop's due.
pub fn total_payable(summaries: &[ShopSummary]) -> f64 {
    summaries.iter().map(|s| s.total_due).sum()
}

// ---------------------------------------------------------------------------
// Running balance
// ---------------------------------------------------------------------------

/// Date-sorted rows with the cumulative balance after each. The sort is
/// stable, so same-date transactions keep their on-disk (insertion) order.
pub fn running_balance(txns_for_shop: &[Transaction]) -> Vec<BalancedRow> {
    let mut sorted: Vec<Transaction> = txns_for_shop.to_vec();
    sorted.sort_by_key(|t| t.date);

    let mut balance = 0.0;
    sorted
        .into_iter()
        .map(|txn| {
            balance += txn.signed_amount();
            BalancedRow { txn, balance_after: balance }
        })
        .collect()
}

/// All transactions of one shop, in on-disk order.
pub fn for_shop(txns: &[Transaction], shop: &str) -> Vec<Transaction> {
    txns.iter().filter(|t| t.shop == shop).cloned().collect()
}
