//! OpenAPI document for the products API.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::products;
use crate::model::{Product, ProductInput};
use crate::response::{AckResult, WriteAck};
use axum::{routing::get, Json, Router};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Products API", version = "1.0.0"),
    paths(products::list, products::read, products::create, products::update, products::delete),
    components(schemas(Product, ProductInput, WriteAck, AckResult, ErrorBody, ErrorDetail))
)]
pub struct ApiDoc;

/// The document with `context_path` as its server URL, since routes are mounted under it.
pub fn api_doc(context_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let url = if context_path.is_empty() { "/" } else { context_path };
    doc.servers = Some(vec![Server::new(url)]);
    doc
}

/// GET /api-doc.
pub fn openapi_routes(context_path: &str) -> Router {
    let doc = api_doc(context_path);
    Router::new().route("/api-doc", get(move || async move { Json(doc) }))
}
