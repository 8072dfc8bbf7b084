//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! malice-cli migrate
//! ```
//!
//! Migrations live in `crates/web/migrations/`.

use super::{CliError, connect};

/// Run the web crate's migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
