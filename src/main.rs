//! Unified surge-rules CLI.
//!
//! - `surge-rules server` - Run the HTTP server and web UI
//! - `surge-rules store` - Manage stored rules directly in the database
//!
//! Each subcommand can also be run as a standalone binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// surge-rules unified CLI.
#[derive(Parser)]
#[command(
    name = "surge-rules",
    version,
    about = "Rule-list management service for routing clients",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    #[command(name = "server", alias = "serve")]
    Server(Box<surge_server::ServerArgs>),

    /// Manage stored rules (SQL backend).
    #[command(name = "store")]
    Store(surge_store::StoreArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Server(args) => surge_server::cli::run(*args).await,
        Commands::Store(args) => surge_store::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
