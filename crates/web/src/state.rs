//! Application state shared across handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tokio::sync::RwLock;

use malice_core::{EmployeeDirectory, MenuBoard};

use crate::config::MaliceConfig;
use crate::db::{self, InMemoryOrderRepository, OrderRepository, PgOrderRepository};
use crate::services::ReportService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The employee directory and
/// the published menu live here for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MaliceConfig,
    pool: Option<PgPool>,
    orders: Arc<dyn OrderRepository>,
    directory: RwLock<EmployeeDirectory>,
    menu: RwLock<MenuBoard>,
    reports: ReportService,
}

impl AppState {
    /// Create the state with an explicit order store.
    #[must_use]
    pub fn new(config: MaliceConfig, orders: Arc<dyn OrderRepository>) -> Self {
        Self::build(config, None, orders)
    }

    /// Create the state with the `PostgreSQL` order store.
    #[must_use]
    pub fn with_pool(config: MaliceConfig, pool: PgPool) -> Self {
        let orders = Arc::new(PgOrderRepository::new(pool.clone()));
        Self::build(config, Some(pool), orders)
    }

    /// Create the state with the in-memory order store.
    #[must_use]
    pub fn in_memory(config: MaliceConfig) -> Self {
        Self::new(config, Arc::new(InMemoryOrderRepository::new()))
    }

    /// Create the state for `config`, connecting to the database when one is configured.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the database pool cannot be created.
    pub async fn from_config(config: MaliceConfig) -> Result<Self, sqlx::Error> {
        match config.database_url.clone() {
            Some(url) => {
                let pool = db::create_pool(&url).await?;
                tracing::info!("Database pool created, orders are persisted");
                Ok(Self::with_pool(config, pool))
            }
            None => {
                tracing::warn!("No database configured, orders are kept in memory only");
                Ok(Self::in_memory(config))
            }
        }
    }

    fn build(
        config: MaliceConfig,
        pool: Option<PgPool>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        let reports = ReportService::new(config.mock_delay, config.report_email.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                orders,
                directory: RwLock::new(EmployeeDirectory::seeded()),
                menu: RwLock::new(MenuBoard::default()),
                reports,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &MaliceConfig {
        &self.inner.config
    }

    /// Get the database pool, if orders are persisted.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderRepository {
        self.inner.orders.as_ref()
    }

    /// Get the employee directory.
    #[must_use]
    pub fn directory(&self) -> &RwLock<EmployeeDirectory> {
        &self.inner.directory
    }

    /// Get the published menu.
    #[must_use]
    pub fn menu(&self) -> &RwLock<MenuBoard> {
        &self.inner.menu
    }

    /// Get the simulated report service.
    #[must_use]
    pub fn reports(&self) -> &ReportService {
        &self.inner.reports
    }
}

/// Today's local calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
