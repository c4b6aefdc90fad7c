//! Repository seam between handlers and the store.

mod crud;
#[cfg(test)]
pub mod memory;

pub use crud::{PgBillRepository, PgItemRepository};

use crate::error::AppError;
use crate::model::Resource;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of a write aimed at one row by identifier.
#[derive(Debug)]
pub struct Written<R> {
    pub entity: R,
    /// Zero when no row had the identifier; the write was then a no-op.
    pub rows_affected: u64,
}

/// Store operations for one entity kind. Each call is a single statement; no retries.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// Insert and return the entity with its assigned identifier.
    async fn create(&self, draft: R::Draft) -> Result<R, AppError>;

    async fn list(&self) -> Result<Vec<R>, AppError>;

    async fn find(&self, id: &R::Id) -> Result<Option<R>, AppError>;

    /// The entity carries `id` and the draft even when no row matched.
    async fn update(&self, id: &R::Id, draft: R::Draft) -> Result<Written<R>, AppError>;

    /// Number of rows removed.
    async fn delete(&self, id: &R::Id) -> Result<u64, AppError>;
}

pub type Repo<R> = Arc<dyn Repository<R>>;
