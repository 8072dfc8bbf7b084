//! Malice CLI - Database migrations and order store tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the order slot table
//! malice-cli migrate
//!
//! # Show or delete stored orders
//! malice-cli orders list
//! malice-cli orders clear --yes
//!
//! # Write export files
//! malice-cli export daily --out ./exports
//! malice-cli export monthly --out ./exports
//! ```
//!
//! All commands read `MALICE_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "malice-cli")]
#[command(author, version, about = "Malice CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect or clear the order store
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Write export files
    Export {
        #[command(subcommand)]
        kind: ExportKind,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Print every stored order, newest first
    List,
    /// Delete every stored order
    Clear {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ExportKind {
    /// Today's orders as XML
    Daily {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// All stored orders as CSV
    Monthly {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list().await?,
            OrdersAction::Clear { yes } => commands::orders::clear(yes).await?,
        },
        Commands::Export { kind } => match kind {
            ExportKind::Daily { out } => commands::export::daily(&out).await?,
            ExportKind::Monthly { out } => commands::export::monthly(&out).await?,
        },
    }
    Ok(())
}
