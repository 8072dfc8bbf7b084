//! `PostgreSQL` order store backed by the `malice.kv_slot` table.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use malice_core::{Order, OrderId};

use super::{ORDERS_SLOT_KEY, OrderRepository, RepositoryError, newest_first, remove, replace};

/// Order store persisted as one JSONB document.
///
/// Reads fetch the whole document. Each mutation runs in a transaction that
/// locks the slot row, applies the change and writes the document back, so
/// concurrent writers queue up instead of overwriting each other.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new repository over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the stored array in submission order.
    ///
    /// A missing slot is an empty store.
    async fn load(&self) -> Result<Vec<Order>, RepositoryError> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM malice.kv_slot WHERE key = $1")
                .bind(ORDERS_SLOT_KEY)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.map(decode_slot).unwrap_or_default())
    }

    /// Apply `change` to the stored array under a row lock.
    ///
    /// Nothing is written when `change` fails.
    async fn modify<F>(&self, change: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Vec<Order>) -> Result<(), RepositoryError> + Send,
    {
        let mut tx = self.pool.begin().await?;

        // Make sure there is a row to lock
        sqlx::query(
            r"
            INSERT INTO malice.kv_slot (key, value)
            VALUES ($1, '[]'::jsonb)
            ON CONFLICT (key) DO NOTHING
            ",
        )
        .bind(ORDERS_SLOT_KEY)
        .execute(&mut *tx)
        .await?;

        let value: serde_json::Value =
            sqlx::query_scalar("SELECT value FROM malice.kv_slot WHERE key = $1 FOR UPDATE")
                .bind(ORDERS_SLOT_KEY)
                .fetch_one(&mut *tx)
                .await?;

        let mut orders = decode_slot(value);
        change(&mut orders)?;

        sqlx::query("UPDATE malice.kv_slot SET value = $2, updated_at = NOW() WHERE key = $1")
            .bind(ORDERS_SLOT_KEY)
            .bind(Json(&orders))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(count = orders.len(), "Saved order slot");
        Ok(())
    }
}

/// Decode the slot document.
///
/// An unreadable document is logged and read as empty; the next write
/// replaces it.
fn decode_slot(value: serde_json::Value) -> Vec<Order> {
    match serde_json::from_value(value) {
        Ok(orders) => orders,
        Err(e) => {
            tracing::error!(
                error = %RepositoryError::DataCorruption(e.to_string()),
                key = ORDERS_SLOT_KEY,
                "Stored orders are unreadable, treating as empty"
            );
            Vec::new()
        }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(newest_first(&self.load().await?))
    }

    async fn append(&self, order: Order) -> Result<(), RepositoryError> {
        self.modify(|orders| {
            orders.push(order);
            Ok(())
        })
        .await
    }

    async fn update(&self, order: Order) -> Result<(), RepositoryError> {
        self.modify(|orders| replace(orders, order)).await
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        self.modify(|orders| remove(orders, id)).await
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.modify(|orders| {
            orders.clear();
            Ok(())
        })
        .await
    }
}
