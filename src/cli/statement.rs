use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::{PledgerError, Result};
use crate::fmt::money;
use crate::reports;

pub fn run(shop: &str) -> Result<()> {
    let txns = open_store()?.load()?;
    let shop_txns = reports::for_shop(&txns, shop);
    if shop_txns.is_empty() {
        return Err(PledgerError::InvalidInput(format!(
            "no transactions for shop {shop:?}"
        )));
    }

    let rows = reports::running_balance(&shop_txns);

    let mut table = Table::new();
    table.set_header(vec!["Date", "Type", "Amount", "Bal"]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(row.txn.date.format("%Y-%m-%d")),
            Cell::new(row.txn.kind.short()),
            Cell::new(format!("{:.2}", row.txn.amount)),
            Cell::new(format!("{:.2}", row.balance_after)),
        ]);
    }

    let due = rows.last().map(|r| r.balance_after).unwrap_or(0.0);
    println!("Statement: {shop}\n{table}");
    println!("{} {}", "Balance due:".bold(), money(due).yellow().bold());
    Ok(())
}
