//! Router assembly.

mod docs;
mod entity;

pub use docs::{docs_routes, ApiDoc};
pub use entity::resource_routes;

use crate::model::{Bill, Item};
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 64 * 1024;

/// Full application: `/itens`, `/bills`, `/openapi.json`, request tracing, body limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<Item>(state.items))
        .merge(resource_routes::<Bill>(state.bills))
        .merge(docs_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT)),
        )
}
