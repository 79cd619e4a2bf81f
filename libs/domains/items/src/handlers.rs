use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ErrorResponse, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnprocessableEntityResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::ITEMS_TAG;
use crate::error::ItemResult;
use crate::models::{ItemSize, ItemView};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(ItemView, ItemSize),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ITEMS_TAG, description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the item router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = ITEMS_TAG,
    responses(
        (status = 200, description = "All items", body = Vec<ItemView>),
        (status = 204, description = "No items exist"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Response> {
    let items = service.list_items().await?;

    if items.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(items).into_response())
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = ITEMS_TAG,
    request_body = ItemView,
    responses(
        (status = 201, description = "Item created successfully", body = ItemView),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ItemView>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;

    AuditEvent::new(
        "item.create",
        Some(format!("item:{}", item.id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({
        "name": item.name,
        "size": item.size.to_string(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ITEMS_TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemView),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<ItemView>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Update an item
///
/// The body `id` must equal the path `id`.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ITEMS_TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = ItemView,
    responses(
        (status = 200, description = "Item updated successfully", body = ItemView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ItemView>,
) -> ItemResult<Json<ItemView>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an item, returning the removed item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ITEMS_TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted successfully", body = ItemView),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ItemResult<Json<ItemView>> {
    let item = service.delete_item(id).await?;

    AuditEvent::new("item.delete", Some(format!("item:{}", id)), AuditOutcome::Success)
        .with_request_headers(&headers)
        .log();

    Ok(Json(item))
}
