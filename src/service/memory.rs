//! In-memory repository for handler tests. Records every call so tests can assert that
//! rejected requests never reached the store.

use crate::error::AppError;
use crate::model::{Bill, BillDraft, Item, ItemDraft, Resource};
use crate::service::{Repository, Written};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

pub trait Stored: Resource + Clone {
    fn key(&self) -> &Self::Id;
    fn materialize(seq: i32, draft: Self::Draft) -> Self;
    fn overwrite(&mut self, draft: Self::Draft);
}

impl Stored for Item {
    fn key(&self) -> &i32 {
        &self.id
    }

    fn materialize(seq: i32, draft: ItemDraft) -> Self {
        Item::from_draft(seq, draft)
    }

    fn overwrite(&mut self, draft: ItemDraft) {
        self.nome = draft.nome;
        self.preco = draft.preco;
    }
}

impl Stored for Bill {
    fn key(&self) -> &Uuid {
        &self.id
    }

    fn materialize(_seq: i32, draft: BillDraft) -> Self {
        let now = Utc::now();
        Bill {
            id: Uuid::new_v4(),
            embasa: draft.embasa,
            coelba: draft.coelba,
            created_at: now,
            updated_at: now,
        }
    }

    fn overwrite(&mut self, draft: BillDraft) {
        self.embasa = draft.embasa;
        self.coelba = draft.coelba;
        self.updated_at = Utc::now();
    }
}

struct Inner<R> {
    rows: Vec<R>,
    seq: i32,
    calls: Vec<&'static str>,
    fail: Option<String>,
}

pub struct MemoryRepository<R> {
    inner: Mutex<Inner<R>>,
}

impl<R: Stored> MemoryRepository<R> {
    pub fn new() -> Self {
        MemoryRepository {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                seq: 0,
                calls: Vec::new(),
                fail: None,
            }),
        }
    }

    pub fn with_rows(rows: Vec<R>) -> Self {
        let repo = Self::new();
        {
            let mut inner = repo.inner.lock().unwrap();
            inner.seq = rows.len() as i32;
            inner.rows = rows;
        }
        repo
    }

    /// Every later call fails with `message` as a database error.
    pub fn failing(message: &str) -> Self {
        let repo = Self::new();
        repo.inner.lock().unwrap().fail = Some(message.to_string());
        repo
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn enter(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, Inner<R>>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(op);
        if let Some(msg) = &inner.fail {
            return Err(AppError::Db(sqlx::Error::Protocol(msg.clone())));
        }
        Ok(inner)
    }
}

#[async_trait]
impl<R> Repository<R> for MemoryRepository<R>
where
    R: Stored,
    R::Id: PartialEq,
{
    async fn create(&self, draft: R::Draft) -> Result<R, AppError> {
        let mut inner = self.enter("create")?;
        inner.seq += 1;
        let row = R::materialize(inner.seq, draft);
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<R>, AppError> {
        Ok(self.enter("list")?.rows.clone())
    }

    async fn find(&self, id: &R::Id) -> Result<Option<R>, AppError> {
        let inner = self.enter("find")?;
        Ok(inner.rows.iter().find(|r| r.key() == id).cloned())
    }

    async fn update(&self, id: &R::Id, draft: R::Draft) -> Result<Written<R>, AppError> {
        let mut inner = self.enter("update")?;
        Ok(match inner.rows.iter_mut().find(|r| r.key() == id) {
            Some(row) => {
                row.overwrite(draft);
                Written {
                    entity: row.clone(),
                    rows_affected: 1,
                }
            }
            None => Written {
                entity: R::echo(*id, draft),
                rows_affected: 0,
            },
        })
    }

    async fn delete(&self, id: &R::Id) -> Result<u64, AppError> {
        let mut inner = self.enter("delete")?;
        let before = inner.rows.len();
        inner.rows.retain(|r| r.key() != id);
        Ok((before - inner.rows.len()) as u64)
    }
}
