use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::money;
use crate::reports;

pub fn run() -> Result<()> {
    let txns = open_store()?.load()?;
    if txns.is_empty() {
        println!("Ledger is empty. Start by adding a transaction with `pledger add`.");
        return Ok(());
    }

    let summaries = reports::summarize(&txns);
    let total = reports::total_payable(&summaries);

    let mut table = Table::new();
    table.set_header(vec!["Shop", "Due"]);
    for s in &summaries {
        table.add_row(vec![Cell::new(&s.shop), Cell::new(money(s.total_due))]);
    }

    println!("Summary\n{table}");
    println!(
        "{} {}",
        "Total Payable to Suppliers:".bold(),
        money(total).yellow().bold()
    );
    Ok(())
}

pub fn shops() -> Result<()> {
    let txns = open_store()?.load()?;
    let shops = reports::shops(&txns);
    if shops.is_empty() {
        println!("No shops yet.");
        return Ok(());
    }
    for shop in shops {
        println!("{shop}");
    }
    Ok(())
}
