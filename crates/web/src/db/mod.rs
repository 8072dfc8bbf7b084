//! Order storage.
//!
//! # Store
//!
//! Orders are kept as one JSON array, in submission order, under the slot
//! key [`ORDERS_SLOT_KEY`]. Every mutation rewrites the whole array while
//! holding the store's write lock (a row lock in `PostgreSQL`).
//!
//! - [`PgOrderRepository`] - `malice.kv_slot` table in `PostgreSQL`
//! - [`InMemoryOrderRepository`] - process memory only
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p malice-cli -- migrate
//! ```

pub mod memory;
pub mod orders;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use malice_core::{Order, OrderId};

pub use memory::InMemoryOrderRepository;
pub use orders::PgOrderRepository;

/// Slot key of the persisted order array.
pub const ORDERS_SLOT_KEY: &str = "maliceAppOrders";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Persistence of submitted orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    /// All orders in submission order.
    ///
    /// Summaries and exports read this order.
    async fn list_submitted(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.list().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Look up one order by id.
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|o| o.id.as_ref() == Some(id)))
    }

    /// Append a new order.
    async fn append(&self, order: Order) -> Result<(), RepositoryError>;

    /// Replace the stored order that has the same id.
    ///
    /// Returns [`RepositoryError::NotFound`] if no order has that id.
    async fn update(&self, order: Order) -> Result<(), RepositoryError>;

    /// Remove the order with `id`.
    ///
    /// Returns [`RepositoryError::NotFound`] if no order has that id.
    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError>;

    /// Remove every order.
    async fn clear(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

// =============================================================================
// Collection helpers shared by both stores (orders in submission order)
// =============================================================================

fn newest_first(orders: &[Order]) -> Vec<Order> {
    orders.iter().rev().cloned().collect()
}

fn replace(orders: &mut [Order], order: Order) -> Result<(), RepositoryError> {
    let id = order.id.as_ref().ok_or(RepositoryError::NotFound)?;
    let slot = orders
        .iter_mut()
        .find(|o| o.id.as_ref() == Some(id))
        .ok_or(RepositoryError::NotFound)?;
    *slot = order;
    Ok(())
}

fn remove(orders: &mut Vec<Order>, id: &OrderId) -> Result<(), RepositoryError> {
    let before = orders.len();
    orders.retain(|o| o.id.as_ref() != Some(id));
    if orders.len() == before {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
