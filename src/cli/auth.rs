use colored::Colorize;
use zeroize::Zeroize;

use crate::auth::CredentialStore;
use crate::error::{PledgerError, Result};
use crate::settings::{get_data_dir, load_settings, save_settings};
use crate::store::LedgerStore;

fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).map_err(PledgerError::Io)
}

pub fn register(email: &str) -> Result<()> {
    let store = CredentialStore::open(&get_data_dir())?;

    let mut password = prompt_password("Password: ")?;
    let mut confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        password.zeroize();
        confirm.zeroize();
        return Err(PledgerError::InvalidInput("passwords do not match".to_string()));
    }

    let result = store.register(email, &password);
    password.zeroize();
    confirm.zeroize();
    result?;

    println!("{} Account created for {email}. Run `pledger login` to start.", "✓".green());
    Ok(())
}

pub fn login(email: &str) -> Result<()> {
    let store = CredentialStore::open(&get_data_dir())?;

    let mut password = prompt_password("Password: ")?;
    let result = store.authenticate(email, &password);
    password.zeroize();
    let session = result?;

    // Touch the user's ledger so a fresh account never errors on first view.
    LedgerStore::open(&get_data_dir(), &session.owner())?.load()?;

    let mut settings = load_settings();
    settings.session_email = Some(session.email.clone());
    save_settings(&settings)?;

    println!("{} Logged in as {}.", "✓".green(), session.email);
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut settings = load_settings();
    match settings.session_email.take() {
        Some(email) => {
            save_settings(&settings)?;
            println!("Logged out {email}.");
        }
        None => println!("No active session."),
    }
    Ok(())
}
