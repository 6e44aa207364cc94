use crate::cli::{current_owner, open_store};
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::reports;
use crate::settings::load_settings;
use crate::store::Owner;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let owner = current_owner();
    let store = open_store()?;

    println!("Data dir:   {}", settings.data_dir);
    match &owner {
        Owner::User(email) => println!("Session:    {email}"),
        Owner::Shared => println!("Session:    (none — shared ledger)"),
    }
    println!("Ledger:     {}", store.path().display());

    if store.path().exists() {
        let size = std::fs::metadata(store.path())?.len();
        println!("Size:       {}", format_bytes(size));

        let txns = store.load()?;
        let summaries = reports::summarize(&txns);
        println!();
        println!("Transactions:  {}", txns.len());
        println!("Shops:         {}", summaries.len());
        println!("Total payable: {}", money(reports::total_payable(&summaries)));
    } else {
        println!();
        println!("No ledger yet. It is created on first use — record a transaction with `pledger add`.");
    }

    Ok(())
}
