//! Entity CRUD handlers: create, list, read, update, delete. Generic over the entity kind.
//!
//! Identifiers and bodies are decoded before the repository is touched, so malformed input
//! never reaches the store.

use crate::codec::{decode_body, ResourceId};
use crate::error::AppError;
use crate::model::Resource;
use crate::service::Repo;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn parse_id<R: Resource>(raw: &str) -> Result<R::Id, AppError> {
    Ok(<R::Id as ResourceId>::parse(raw)?)
}

fn parse_draft<R: Resource>(body: &[u8]) -> Result<R::Draft, AppError> {
    let payload = decode_body::<R::Payload>(body)?;
    Ok(R::draft(payload)?)
}

fn not_found<R: Resource>(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} {}", R::NAME, id))
}

pub async fn create<R: Resource>(
    State(repo): State<Repo<R>>,
    body: Bytes,
) -> Result<Json<R>, AppError> {
    let draft = parse_draft::<R>(&body)?;
    let entity = repo.create(draft).await?;
    tracing::info!(resource = R::NAME, "created");
    Ok(Json(entity))
}

pub async fn list<R: Resource>(State(repo): State<Repo<R>>) -> Result<Json<Vec<R>>, AppError> {
    let rows = repo.list().await?;
    tracing::debug!(resource = R::NAME, count = rows.len(), "listed");
    Ok(Json(rows))
}

pub async fn read<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id_str): Path<String>,
) -> Result<Json<R>, AppError> {
    let id = parse_id::<R>(&id_str)?;
    let entity = repo.find(&id).await?.ok_or_else(|| not_found::<R>(&id))?;
    Ok(Json(entity))
}

/// Identifier is checked first, then the body. The response carries the path identifier and the
/// submitted fields, also when no row had that identifier.
pub async fn update<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<Json<R>, AppError> {
    let id = parse_id::<R>(&id_str)?;
    let draft = parse_draft::<R>(&body)?;
    let written = repo.update(&id, draft).await?;
    if written.rows_affected == 0 {
        tracing::warn!(resource = R::NAME, id = %id, "update matched no row");
    } else {
        tracing::info!(resource = R::NAME, id = %id, "updated");
    }
    Ok(Json(written.entity))
}

/// 200 with an empty body, whether or not a row was removed.
pub async fn delete<R: Resource>(
    State(repo): State<Repo<R>>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id::<R>(&id_str)?;
    if repo.delete(&id).await? == 0 {
        tracing::warn!(resource = R::NAME, id = %id, "delete matched no row");
    } else {
        tracing::info!(resource = R::NAME, id = %id, "deleted");
    }
    Ok(StatusCode::OK)
}
