//! In-process order store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use malice_core::{Order, OrderId};

use super::{OrderRepository, RepositoryError, newest_first, remove, replace};

/// Orders held in process memory; lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `orders`, given in submission order.
    #[must_use]
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(newest_first(&self.orders.read().await))
    }

    async fn append(&self, order: Order) -> Result<(), RepositoryError> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn update(&self, order: Order) -> Result<(), RepositoryError> {
        replace(&mut *self.orders.write().await, order)
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        remove(&mut *self.orders.write().await, id)
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.orders.write().await.clear();
        Ok(())
    }
}
