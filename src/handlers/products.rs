//! Product handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::FailFlag;
use crate::model::{Product, ProductInput};
use crate::response::{ApiJson, WriteAck};
use crate::service::{ProductService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

fn ack_response(ack: WriteAck, success: StatusCode, pretty: bool) -> ApiJson<WriteAck> {
    let status = if ack.is_rollback() { StatusCode::OK } else { success };
    ApiJson::with_status(status, ack, pretty)
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<ApiJson<Vec<Product>>, AppError> {
    let rows = ProductService::list(state.store.as_ref()).await?;
    Ok(ApiJson::ok(rows, state.pretty_json))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<ApiJson<Product>, AppError> {
    let id = parse_id(&id_str)?;
    let row = ProductService::read(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
    Ok(ApiJson::ok(row, state.pretty_json))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductInput,
    params(("fail" = Option<String>, Header, description = "`true` forces the transaction to roll back")),
    responses(
        (status = 201, description = "Inserted", body = WriteAck),
        (status = 200, description = "Forced rollback", body = WriteAck),
        (status = 422, description = "Missing or invalid field", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    fail: FailFlag,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiJson<WriteAck>, AppError> {
    let Json(body) = body?;
    let input = RequestValidator::product_input(body)?;
    let ack = ProductService::create(state.store.as_ref(), input, fail).await?;
    Ok(ack_response(ack, StatusCode::CREATED, state.pretty_json))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    request_body = ProductInput,
    params(
        ("id" = i64, Path, description = "Product id"),
        ("fail" = Option<String>, Header, description = "`true` forces the transaction to roll back")
    ),
    responses(
        (status = 200, description = "Updated, or forced rollback", body = WriteAck),
        (status = 404, description = "No such product", body = ErrorBody),
        (status = 422, description = "Missing or invalid field", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    fail: FailFlag,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiJson<WriteAck>, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = body?;
    let input = RequestValidator::product_input(body)?;
    let ack = ProductService::update(state.store.as_ref(), id, input, fail).await?;
    Ok(ack_response(ack, StatusCode::OK, state.pretty_json))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
        ("fail" = Option<String>, Header, description = "`true` forces the transaction to roll back")
    ),
    responses(
        (status = 200, description = "Deleted, or forced rollback", body = WriteAck),
        (status = 404, description = "No such product", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    fail: FailFlag,
) -> Result<ApiJson<WriteAck>, AppError> {
    let id = parse_id(&id_str)?;
    let ack = ProductService::delete(state.store.as_ref(), id, fail).await?;
    Ok(ack_response(ack, StatusCode::OK, state.pretty_json))
}
