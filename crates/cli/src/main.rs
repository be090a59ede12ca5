//! Grocerly CLI - smoke-test the SDK from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Next delivery dates from the backend schedule (or --active to force one)
//! grocerly delivery-days
//! grocerly delivery-days --active 1,4
//!
//! # Resolve an address to coordinates
//! grocerly geocode "12 Olive St, Nicosia"
//!
//! # Price a cart read from stdin as JSON
//! grocerly price < cart.json
//! ```
//!
//! Configuration comes from the environment (see `grocerly_client::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "grocerly")]
#[command(author, version, about = "Grocerly client SDK tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the next selectable delivery dates
    DeliveryDays {
        /// Override the active weekdays (comma-separated, 1=Mon..7=Sun)
        #[arg(long)]
        active: Option<String>,
    },
    /// Geocode a free-form address
    Geocode {
        /// The address to resolve
        address: String,
    },
    /// Price a JSON cart from stdin and print the totals
    Price,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grocerly=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::DeliveryDays { active } => commands::delivery_days(active.as_deref()).await?,
        Commands::Geocode { address } => commands::geocode(&address).await?,
        Commands::Price => commands::price()?,
    }
    Ok(())
}
