mod auth;
mod cli;
mod error;
mod fmt;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Register { email } => cli::auth::register(&email),
        Commands::Login { email } => cli::auth::login(&email),
        Commands::Logout => cli::auth::logout(),
        Commands::Add { shop, kind, amount, date, note } => {
            cli::add::run(&shop, &kind, amount, date, &note)
        }
        Commands::Summary => cli::summary::run(),
        Commands::Shops => cli::summary::shops(),
        Commands::Statement { shop } => cli::statement::run(&shop),
        #[cfg(feature = "pdf")]
        Commands::Export { shop, output } => cli::export::run(&shop, output),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
