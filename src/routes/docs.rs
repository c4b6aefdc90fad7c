//! `GET /openapi.json`: schema document for the entity payloads.

use crate::model::{Bill, BillPayload, Item, ItemPayload};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "crud-service"),
    components(schemas(Item, ItemPayload, Bill, BillPayload))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}
