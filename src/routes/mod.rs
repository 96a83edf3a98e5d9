//! Router assembly: product routes under the context path, common routes at the root.

mod common;
mod openapi;
mod products;

pub use common::common_routes;
pub use openapi::{api_doc, openapi_routes, ApiDoc};
pub use products::product_routes;

use crate::config::ServerConfig;
use crate::extractors::FAIL_HEADER;
use crate::state::AppState;
use axum::http::{header, HeaderName, Method};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Create the application router with all routes and middleware.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static(FAIL_HEADER),
        ]);

    let api = product_routes(state.clone())
        .merge(openapi_routes(&config.context_path))
        .layer(cors);

    let mounted = if config.context_path.is_empty() {
        api
    } else {
        Router::new().nest(&config.context_path, api)
    };

    mounted
        .merge(common_routes(state))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
