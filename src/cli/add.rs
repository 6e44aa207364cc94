use colored::Colorize;

use crate::cli::open_store;
use crate::error::{PledgerError, Result};
use crate::models::{Transaction, TxnKind};
use crate::store::parse_date;

fn parse_kind(raw: &str) -> Result<TxnKind> {
    match raw.to_ascii_lowercase().as_str() {
        "credit" | "purchase" | "buy" => Ok(TxnKind::Credit),
        "debit" | "payment" | "pay" => Ok(TxnKind::Debit),
        other => Err(PledgerError::InvalidInput(format!(
            "unknown type {other:?} (expected credit or debit)"
        ))),
    }
}

pub fn run(shop: &str, kind: &str, amount: f64, date: Option<String>, note: &str) -> Result<()> {
    // Validate everything before touching the file; a rejected entry must
    // leave the ledger unmodified.
    let shop = shop.trim();
    if shop.is_empty() {
        return Err(PledgerError::InvalidInput("shop name is required".to_string()));
    }
    if !(amount > 0.0) {
        return Err(PledgerError::InvalidInput(format!(
            "amount must be greater than zero (got {amount})"
        )));
    }
    let kind = parse_kind(kind)?;
    let date = match date {
        Some(raw) => parse_date(&raw).ok_or_else(|| {
            PledgerError::InvalidInput(format!("bad date {raw:?} (expected YYYY-MM-DD)"))
        })?,
        None => chrono::Local::now().date_naive(),
    };

    let store = open_store()?;
    store.append(Transaction {
        date,
        shop: shop.to_string(),
        kind,
        amount,
        description: note.to_string(),
    })?;

    println!(
        "{} {} {} {:.2} at {shop} on {date}",
        "✓".green(),
        "Saved".bold(),
        kind.short(),
        amount,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("credit").unwrap(), TxnKind::Credit);
        assert_eq!(parse_kind("Credit").unwrap(), TxnKind::Credit);
        assert_eq!(parse_kind("buy").unwrap(), TxnKind::Credit);
        assert_eq!(parse_kind("debit").unwrap(), TxnKind::Debit);
        assert_eq!(parse_kind("pay").unwrap(), TxnKind::Debit);
        assert!(parse_kind("transfer").is_err());
    }
}
