//! Product routes. Mounted under the configured context path.

use crate::handlers::products::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
