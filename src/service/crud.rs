//! PostgreSQL repositories for items and bills.

use crate::codec::to_canonical;
use crate::error::AppError;
use crate::model::{Bill, BillDraft, Item, ItemDraft, Resource};
use crate::service::{Repository, Written};
use crate::sql::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

type BillRow = (Vec<u8>, f64, f64, DateTime<Utc>, DateTime<Utc>);

#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        PgItemRepository { pool }
    }
}

#[async_trait]
impl Repository<Item> for PgItemRepository {
    async fn create(&self, draft: ItemDraft) -> Result<Item, AppError> {
        tracing::debug!(sql = %INSERT_ITEM, nome = %draft.nome, preco = draft.preco, "query");
        let id: i32 = sqlx::query_scalar(INSERT_ITEM)
            .bind(&draft.nome)
            .bind(draft.preco)
            .fetch_one(&self.pool)
            .await?;
        Ok(Item::from_draft(id, draft))
    }

    async fn list(&self) -> Result<Vec<Item>, AppError> {
        tracing::debug!(sql = %SELECT_ITEMS, "query");
        let rows: Vec<(i32, String, f64)> = sqlx::query_as(SELECT_ITEMS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, nome, preco)| Item { id, nome, preco })
            .collect())
    }

    async fn find(&self, id: &i32) -> Result<Option<Item>, AppError> {
        tracing::debug!(sql = %SELECT_ITEM, id, "query");
        let row: Option<(i32, String, f64)> = sqlx::query_as(SELECT_ITEM)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, nome, preco)| Item { id, nome, preco }))
    }

    async fn update(&self, id: &i32, draft: ItemDraft) -> Result<Written<Item>, AppError> {
        tracing::debug!(sql = %UPDATE_ITEM, id, "query");
        let done = sqlx::query(UPDATE_ITEM)
            .bind(&draft.nome)
            .bind(draft.preco)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Written {
            entity: Item::echo(*id, draft),
            rows_affected: done.rows_affected(),
        })
    }

    async fn delete(&self, id: &i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %DELETE_ITEM, id, "query");
        let done = sqlx::query(DELETE_ITEM).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgBillRepository {
    pool: PgPool,
}

impl PgBillRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBillRepository { pool }
    }
}

/// Decode a stored row; the id column goes back through the canonical-string transform.
fn bill_from_row(row: BillRow) -> Result<Bill, AppError> {
    let (raw_id, embasa, coelba, created_at, updated_at) = row;
    let canonical = to_canonical(&raw_id)?;
    let id = Uuid::parse_str(&canonical)
        .map_err(|e| crate::error::CodecError::Storage(format!("{}: {}", canonical, e)))?;
    Ok(Bill {
        id,
        embasa,
        coelba,
        created_at,
        updated_at,
    })
}

fn storage_key(id: &Uuid) -> Result<[u8; 16], AppError> {
    Ok(crate::codec::to_storage_binary(&id.to_string())?)
}

#[async_trait]
impl Repository<Bill> for PgBillRepository {
    async fn create(&self, draft: BillDraft) -> Result<Bill, AppError> {
        let id = Uuid::new_v4();
        let key = storage_key(&id)?;
        tracing::debug!(sql = %INSERT_BILL, %id, "query");
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(INSERT_BILL)
            .bind(&key[..])
            .bind(draft.embasa)
            .bind(draft.coelba)
            .fetch_one(&self.pool)
            .await?;
        Ok(Bill {
            id,
            embasa: draft.embasa,
            coelba: draft.coelba,
            created_at,
            updated_at,
        })
    }

    async fn list(&self) -> Result<Vec<Bill>, AppError> {
        tracing::debug!(sql = %SELECT_BILLS, "query");
        let rows: Vec<BillRow> = sqlx::query_as(SELECT_BILLS).fetch_all(&self.pool).await?;
        rows.into_iter().map(bill_from_row).collect()
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Bill>, AppError> {
        let key = storage_key(id)?;
        tracing::debug!(sql = %SELECT_BILL, %id, "query");
        let row: Option<BillRow> = sqlx::query_as(SELECT_BILL)
            .bind(&key[..])
            .fetch_optional(&self.pool)
            .await?;
        row.map(bill_from_row).transpose()
    }

    /// `RETURNING` yields no row when nothing matched; the echoed bill then has fresh timestamps.
    async fn update(&self, id: &Uuid, draft: BillDraft) -> Result<Written<Bill>, AppError> {
        let key = storage_key(id)?;
        tracing::debug!(sql = %UPDATE_BILL, %id, "query");
        let row: Option<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(UPDATE_BILL)
            .bind(draft.embasa)
            .bind(draft.coelba)
            .bind(&key[..])
            .fetch_optional(&self.pool)
            .await?;
        Ok(match row {
            Some((created_at, updated_at)) => Written {
                entity: Bill {
                    id: *id,
                    embasa: draft.embasa,
                    coelba: draft.coelba,
                    created_at,
                    updated_at,
                },
                rows_affected: 1,
            },
            None => Written {
                entity: Bill::echo(*id, draft),
                rows_affected: 0,
            },
        })
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, AppError> {
        let key = storage_key(id)?;
        tracing::debug!(sql = %DELETE_BILL, %id, "query");
        let done = sqlx::query(DELETE_BILL)
            .bind(&key[..])
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}
