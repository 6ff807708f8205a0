//! Stride CLI - database migrations and seed data.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! stride-cli migrate
//!
//! # Seed lookups and 15 demo products
//! stride-cli seed
//!
//! # Seed lookups and 40 demo products
//! stride-cli seed --products 40
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stride-cli")]
#[command(author, version, about = "Stride storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Seed lookup dimensions and demo products
    Seed {
        /// Number of products to create
        #[arg(short, long, default_value_t = 15)]
        products: usize,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { products } => {
            commands::seed::catalog(products).await?;
        }
    }
    Ok(())
}
