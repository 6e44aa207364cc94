pub mod add;
pub mod auth;
pub mod backup;
#[cfg(feature = "pdf")]
pub mod export;
pub mod init;
pub mod statement;
pub mod status;
pub mod summary;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::settings::{get_data_dir, load_settings};
use crate::store::{LedgerStore, Owner};

/// Resolve whose ledger the current invocation targets: the logged-in user's
/// if a session is set, else the shared single-user ledger.
pub(crate) fn current_owner() -> Owner {
    match load_settings().session_email {
        Some(email) => Owner::User(email),
        None => Owner::Shared,
    }
}

pub(crate) fn open_store() -> Result<LedgerStore> {
    LedgerStore::open(&get_data_dir(), &current_owner())
}

#[derive(Parser)]
#[command(name = "pledger", about = "Pocket ledger CLI for small-shop supplier bookkeeping.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up pledger: choose a data directory.
    Init {
        /// Path for pledger data (default: ~/Documents/pledger)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Create an account. Prompts for a password.
    Register {
        /// Email address (used as the account key)
        #[arg(long)]
        email: String,
    },
    /// Log in and keep the session for later commands.
    Login {
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Clear the current session.
    Logout,
    /// Record a transaction.
    Add {
        /// Shop name (case and whitespace significant)
        #[arg(long)]
        shop: String,
        /// Transaction type: credit (purchase) or debit (payment)
        #[arg(long = "type")]
        kind: String,
        /// Amount, must be greater than zero
        #[arg(long)]
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Free-text note, e.g. 'Invoice #123'
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Per-shop dues and the total payable.
    Summary,
    /// List shops in first-appearance order.
    Shops,
    /// Running-balance statement for one shop.
    Statement {
        /// Shop name, exactly as recorded
        shop: String,
    },
    /// Export a shop statement to PDF.
    #[cfg(feature = "pdf")]
    Export {
        /// Shop name, exactly as recorded
        shop: String,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
    /// Copy the raw ledger file for download/backup.
    Backup {
        /// Output path (default: <data_dir>/backups/ledger-YYYYMMDD-HHMMSS.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show data directory, session, and ledger statistics.
    Status,
}
