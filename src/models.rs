use chrono::NaiveDate;

/// A transaction is exactly one of these two kinds. Older ledger files carry
/// free-form type labels; the model is a closed enum, with leniency kept only
/// at the parsing edge (see `parse_label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnKind {
    /// A purchase: increases the amount owed to the shop.
    Credit,
    /// A payment: decreases the amount owed to the shop.
    Debit,
}

impl TxnKind {
    /// Canonical label written to the ledger file.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Credit => "Credit (Purchase)",
            Self::Debit => "Debit (Payment)",
        }
    }

    /// Short label for terminal display.
    pub fn short(&self) -> &'static str {
        match self {
            Self::Credit => "Buy",
            Self::Debit => "Pay",
        }
    }

    /// Parse a stored type label. Accepts any label containing "Credit" or
    /// "Debit" so files written by older versions still load; anything else
    /// is malformed.
    pub fn parse_label(raw: &str) -> Option<Self> {
        if raw.contains("Credit") {
            Some(Self::Credit)
        } else if raw.contains("Debit") {
            Some(Self::Debit)
        } else {
            None
        }
    }

    /// The amount sign this kind contributes to a balance.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Credit => 1.0,
            Self::Debit => -1.0,
        }
    }
}

/// One ledger entry. Amounts are validated (> 0) at the CLI boundary before
/// a Transaction is ever constructed for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub shop: String,
    pub kind: TxnKind,
    pub amount: f64,
    pub description: String,
}

impl Transaction {
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}

/// Per-shop amount owed, derived from the full table. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopSummary {
    pub shop: String,
    pub total_due: f64,
}

/// A transaction paired with the running balance after it, for statements.
#[derive(Debug, Clone)]
pub struct BalancedRow {
    pub txn: Transaction,
    pub balance_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_canonical() {
        assert_eq!(TxnKind::parse_label("Credit (Purchase)"), Some(TxnKind::Credit));
        assert_eq!(TxnKind::parse_label("Debit (Payment)"), Some(TxnKind::Debit));
    }

    #[test]
    fn test_parse_label_lenient() {
        assert_eq!(TxnKind::parse_label("Credit"), Some(TxnKind::Credit));
        assert_eq!(TxnKind::parse_label("Store Credit"), Some(TxnKind::Credit));
        assert_eq!(TxnKind::parse_label("Debit"), Some(TxnKind::Debit));
    }

    #[test]
    fn test_parse_label_rejects_unknown() {
        assert_eq!(TxnKind::parse_label("Transfer"), None);
        assert_eq!(TxnKind::parse_label(""), None);
    }

    #[test]
    fn test_credit_wins_when_both_substrings_present() {
        // "Credit" is checked first, so it wins on ambiguous labels.
        assert_eq!(TxnKind::parse_label("Credit then Debit"), Some(TxnKind::Credit));
    }

    #[test]
    fn test_signed_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let buy = Transaction {
            date,
            shop: "Acme".into(),
            kind: TxnKind::Credit,
            amount: 500.0,
            description: String::new(),
        };
        let pay = Transaction { kind: TxnKind::Debit, amount: 200.0, ..buy.clone() };
        assert_eq!(buy.signed_amount(), 500.0);
        assert_eq!(pay.signed_amount(), -200.0);
    }
}
