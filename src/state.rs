//! Shared application state. Repositories are injected so handlers never reach for a global pool.

use crate::model::{Bill, Item};
use crate::service::{PgBillRepository, PgItemRepository, Repo};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub items: Repo<Item>,
    pub bills: Repo<Bill>,
}

impl AppState {
    /// Postgres-backed repositories sharing one pool.
    pub fn from_pool(pool: PgPool) -> Self {
        AppState {
            items: Arc::new(PgItemRepository::new(pool.clone())),
            bills: Arc::new(PgBillRepository::new(pool)),
        }
    }
}
