use std::path::PathBuf;

use crate::cli::open_store;
use crate::error::{PledgerError, Result};
use crate::reports;
use crate::settings::get_data_dir;

/// Filename-safe shop slug: keep alphanumerics, collapse the rest to '-'.
fn shop_slug(shop: &str) -> String {
    let mut slug = String::new();
    for c in shop.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn default_path(shop: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir()
        .join("exports")
        .join(format!("{}-{date}.pdf", shop_slug(shop)))
}

pub fn run(shop: &str, output: Option<String>) -> Result<()> {
    let txns = open_store()?.load()?;
    let shop_txns = reports::for_shop(&txns, shop);
    if shop_txns.is_empty() {
        return Err(PledgerError::InvalidInput(format!(
            "no transactions for shop {shop:?}"
        )));
    }

    let rows = reports::running_balance(&shop_txns);
    let bytes = crate::pdf::render_statement(shop, &rows)?;

    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path(shop));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}
