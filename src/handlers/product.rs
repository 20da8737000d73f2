//! Product CRUD handlers: list, read, create, update, toggle availability, delete.
//!
//! Every handler that takes a path id or a body runs its rules first; a failed rule answers 400 before the store is touched.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::error::{AppError, ValidationErrorBody};
use crate::extractors::JsonObject;
use crate::model::ProductInput;
use crate::response::{
    message, product_created, product_list, product_ok, product_updated, MessageBody, ProductBody, ProductListBody,
    ProductUpdatedBody, PRODUCT_DELETED,
};
use crate::service::validation::{record_id, ID_PARAM, PRODUCT_BODY};
use crate::service::RequestValidator;
use crate::state::AppState;

/// Maximum number of products returned by the list.
pub const LIST_LIMIT: i64 = 10;

/// Validate the id param and resolve it to a key. A numeric id that cannot be a key names no product.
fn checked_id(raw: &str) -> Result<i32, AppError> {
    RequestValidator::new().param(&ID_PARAM, raw).finish()?;
    record_id(raw).ok_or(AppError::NotFound)
}

/// Get all products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Success", body = ProductListBody),
        (status = 500, description = "Internal Server Error", body = MessageBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.store.list(LIST_LIMIT).await?;
    Ok(product_list(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "The product ID")),
    responses(
        (status = 200, description = "Success", body = ProductBody),
        (status = 400, description = "Bad Request", body = ValidationErrorBody),
        (status = 404, description = "Not Found", body = MessageBody),
    )
)]
pub async fn read(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(&id)?;
    let product = state.store.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(product_ok(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Created", body = ProductBody),
        (status = 400, description = "Bad Request", body = ValidationErrorBody),
    )
)]
pub async fn create(State(state): State<AppState>, JsonObject(body): JsonObject) -> Result<impl IntoResponse, AppError> {
    RequestValidator::new().body(PRODUCT_BODY, &body).finish()?;
    let input = ProductInput::from_body(&body)?;
    let product = state.store.create(input.into_new_product()).await?;
    tracing::info!(id = product.id, "product created");
    Ok(product_created(product))
}

/// Update a product by ID
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "The product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Success", body = ProductUpdatedBody),
        (status = 400, description = "Bad Request", body = ValidationErrorBody),
        (status = 404, description = "Not Found", body = MessageBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::new()
        .param(&ID_PARAM, &id)
        .body(PRODUCT_BODY, &body)
        .finish()?;
    let id = record_id(&id).ok_or(AppError::NotFound)?;
    let input = ProductInput::from_body(&body)?;
    let product = state.store.update(id, input).await?.ok_or(AppError::NotFound)?;
    Ok(product_updated(product))
}

/// Update a product availability by ID
///
/// Flips the stored availability; any request body is ignored.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "The product ID")),
    responses(
        (status = 200, description = "Success", body = ProductUpdatedBody),
        (status = 400, description = "Bad Request", body = ValidationErrorBody),
        (status = 404, description = "Not Found", body = MessageBody),
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(&id)?;
    let product = state
        .store
        .toggle_availability(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(product_updated(product))
}

/// Delete a product by ID
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "The product ID")),
    responses(
        (status = 200, description = "Success", body = MessageBody),
        (status = 400, description = "Bad Request", body = ValidationErrorBody),
        (status = 404, description = "Not Found", body = MessageBody),
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = checked_id(&id)?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, "product deleted");
    Ok(message(PRODUCT_DELETED))
}
