//! Export commands.
//!
//! Write the same files the admin panel offers for download.

use std::path::{Path, PathBuf};

use malice_core::{ExportFile, export};
use malice_web::db::OrderRepository;
use malice_web::state::today;

use super::{CliError, order_store};

fn write_file(dir: &Path, file: &ExportFile) -> Result<PathBuf, CliError> {
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.content).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

/// Write today's orders as XML into `out`.
pub async fn daily(out: &Path) -> Result<(), CliError> {
    let orders = order_store().await?.list_submitted().await?;
    let file = export::daily_xml(&orders, today())?;
    let path = write_file(out, &file)?;
    tracing::info!(orders = file.orders, path = %path.display(), "Daily export written");
    Ok(())
}

/// Write every stored order as CSV into `out`.
pub async fn monthly(out: &Path) -> Result<(), CliError> {
    let orders = order_store().await?.list_submitted().await?;
    let file = export::monthly_csv(&orders, today())?;
    let path = write_file(out, &file)?;
    tracing::info!(orders = file.orders, path = %path.display(), "Monthly export written");
    Ok(())
}
