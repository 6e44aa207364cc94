use std::path::PathBuf;

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::get_data_dir;

pub fn run(output: Option<String>) -> Result<()> {
    let store = open_store()?;
    store.load()?; // creates the file on a fresh install
    let bytes = store.raw_bytes()?;

    let dest_path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let backups_dir = get_data_dir().join("backups");
            std::fs::create_dir_all(&backups_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            backups_dir.join(format!("ledger-{stamp}.csv"))
        }
    };

    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // The backup is the backing file's bytes, unchanged.
    std::fs::write(&dest_path, &bytes)?;

    println!("Backup saved to {}", dest_path.display());
    println!("Size: {}", format_bytes(bytes.len() as u64));
    Ok(())
}
