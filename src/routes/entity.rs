//! Entity CRUD routes: `R::PATH` for list/create, `R::PATH/:id` for read/update/delete.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::model::Resource;
use crate::service::Repo;
use axum::{routing::get, Router};

pub fn resource_routes<R: Resource>(repo: Repo<R>) -> Router {
    Router::new()
        .route(R::PATH, get(list::<R>).post(create::<R>))
        .route(
            &format!("{}/:id", R::PATH),
            get(read::<R>).put(update::<R>).delete(delete_handler::<R>),
        )
        .with_state(repo)
}
