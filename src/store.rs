use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{PledgerError, Result};
use crate::models::{Transaction, TxnKind};

pub const LEDGER_HEADER: [&str; 5] = ["Date", "Shop Name", "Type", "Amount", "Description"];

/// Ledger file used when no one is logged in (the single-user mode).
const SHARED_LEDGER_FILE: &str = "ledger_data.csv";

/// Whose ledger a store operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// The shared, single-user ledger.
    Shared,
    /// A registered user's ledger, keyed by email.
    User(String),
}

impl Owner {
    pub fn ledger_filename(&self) -> String {
        match self {
            Self::Shared => SHARED_LEDGER_FILE.to_string(),
            Self::User(email) => format!("{}_ledger.csv", ledger_key(email)),
        }
    }
}

/// Filesystem-safe transform of an email: `@` and `.` become `_`.
pub fn ledger_key(email: &str) -> String {
    email.replace(['@', '.'], "_")
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a ledger Amount cell. This is the store's own format, not foreign
/// bank input: anything unparseable or non-positive is malformed, never
/// silently coerced.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let amount: f64 = raw.trim().parse().ok()?;
    if amount > 0.0 {
        Some(amount)
    } else {
        None
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

// ---------------------------------------------------------------------------
// LedgerStore
// ---------------------------------------------------------------------------

/// One CSV file per owner. Reads load the whole table; writes rewrite the
/// whole file, which stays the single source of truth (no side append log).
/// Rewrites go through a sibling temp file renamed over the target, so a
/// concurrent reader never sees a torn file. Two concurrent writers remain
/// last-write-wins, matching the observed file semantics.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn open(data_dir: &Path, owner: &Owner) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(owner.ledger_filename()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every transaction in on-disk order. A missing file is created
    /// with a header row and loads as empty, so a fresh account never errors
    /// on first view.
    pub fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            self.rewrite(&[])?;
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut txns = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let line = i + 2; // 1-based, after the header
            let date = parse_date(record.get(0).unwrap_or("")).ok_or_else(|| {
                PledgerError::Storage(format!(
                    "{}: line {line}: bad date {:?}",
                    self.path.display(),
                    record.get(0).unwrap_or("")
                ))
            })?;
            let kind = TxnKind::parse_label(record.get(2).unwrap_or("")).ok_or_else(|| {
                PledgerError::Storage(format!(
                    "{}: line {line}: bad type {:?}",
                    self.path.display(),
                    record.get(2).unwrap_or("")
                ))
            })?;
            let amount = parse_amount(record.get(3).unwrap_or("")).ok_or_else(|| {
                PledgerError::Storage(format!(
                    "{}: line {line}: bad amount {:?}",
                    self.path.display(),
                    record.get(3).unwrap_or("")
                ))
            })?;
            txns.push(Transaction {
                date,
                shop: record.get(1).unwrap_or("").to_string(),
                kind,
                amount,
                description: record.get(4).unwrap_or("").to_string(),
            });
        }
        Ok(txns)
    }

    /// Load-all, append in memory, rewrite-all. O(n) per write, acceptable at
    /// single-business bookkeeping scale.
    pub fn append(&self, txn: Transaction) -> Result<()> {
        let mut txns = self.load()?;
        txns.push(txn);
        self.rewrite(&txns)
    }

    /// The backing file's exact bytes, for backup/download.
    pub fn raw_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    fn rewrite(&self, txns: &[Transaction]) -> Result<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            writer.write_record(LEDGER_HEADER)?;
            for t in txns {
                writer.write_record([
                    t.date.format("%Y-%m-%d").to_string(),
                    t.shop.clone(),
                    t.kind.label().to_string(),
                    format!("{}", t.amount),
                    t.description.clone(),
                ])?;
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
