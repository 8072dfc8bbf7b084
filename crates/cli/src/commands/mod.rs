//! CLI command implementations.

pub mod export;
pub mod migrate;
pub mod orders;

use sqlx::PgPool;
use thiserror::Error;

use malice_core::ExportError;
use malice_web::MaliceConfig;
use malice_web::config::ConfigError;
use malice_web::db::{self, PgOrderRepository, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Order store operation failed.
    #[error("Order store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Nothing to export.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Writing the export file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Destructive command run without `--yes`.
    #[error("Refusing to delete {0} orders without --yes")]
    NotConfirmed(usize),
}

/// Connect to the configured database.
pub async fn connect() -> Result<PgPool, CliError> {
    let config = MaliceConfig::from_env()?;
    let url = config.require_database_url()?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(url).await?)
}

/// The `PostgreSQL` order store of the configured database.
pub async fn order_store() -> Result<PgOrderRepository, CliError> {
    Ok(PgOrderRepository::new(connect().await?))
}
