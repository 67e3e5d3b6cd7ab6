use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use crate::category::CategoryCatalog;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub categories: Arc<CategoryCatalog>,
    pub payment_delay: Duration,
}

impl AppState {
    pub fn new(pool: SqlitePool, categories: CategoryCatalog, payment_delay: Duration) -> Self {
        Self {
            pool,
            categories: Arc::new(categories),
            payment_delay,
        }
    }
}
