use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::gallery_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::gallery::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Gallery",
    operation_id = "createGalleryItem",
    summary = "Create a gallery item",
    description = "Creates a gallery item. `display_order` defaults to the end of the list.",
    request_body = CreateGalleryItemRequest,
    responses(
        (status = 201, description = "Gallery item created", body = GalleryItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_gallery_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateGalleryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_gallery_item(&payload)?;

    let txn = state.db.begin().await?;
    let display_order = match payload.display_order {
        Some(order) => order,
        None => next_display_order(&txn).await?,
    };

    let now = chrono::Utc::now();
    let model = gallery_item::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        image_url: Set(payload.image_url),
        description: Set(payload.description),
        category: Set(payload.category.map(|c| c.trim().to_string())),
        display_order: Set(display_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(GalleryItemResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Gallery",
    operation_id = "listGalleryItems",
    summary = "List gallery items",
    description = "Returns all gallery items ordered by `display_order`, then ID.",
    responses(
        (status = 200, description = "Gallery items", body = Vec<GalleryItemResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gallery_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    Ok(Json(load_gallery(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Gallery",
    operation_id = "getGalleryItem",
    summary = "Get a gallery item by ID",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GalleryItemResponse>, AppError> {
    Ok(Json(find_gallery_item(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Gallery",
    operation_id = "updateGalleryItem",
    summary = "Update a gallery item",
    description = "Partially updates a gallery item. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Gallery item ID")),
    request_body = UpdateGalleryItemRequest,
    responses(
        (status = 200, description = "Gallery item updated", body = GalleryItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateGalleryItemRequest>,
) -> Result<Json<GalleryItemResponse>, AppError> {
    validate_update_gallery_item(&payload)?;

    if payload == UpdateGalleryItemRequest::default() {
        let existing = find_gallery_item(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: gallery_item::ActiveModel = find_gallery_item(&txn, id).await?.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(category) = payload.category {
        active.category = Set(category.map(|c| c.trim().to_string()));
    }
    if let Some(order) = payload.display_order {
        active.display_order = Set(order);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Gallery",
    operation_id = "deleteGalleryItem",
    summary = "Delete a gallery item",
    description = "Deletes the record. Its image stays on disk until the next unused-asset sweep.",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 204, description = "Gallery item deleted"),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = gallery_item::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Gallery item not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/reorder",
    tag = "Gallery",
    operation_id = "reorderGalleryItems",
    summary = "Reorder gallery items",
    description = "Assigns `display_order` 0, 1, 2, ... following the order of `gallery_item_ids`. \
        Items not listed keep their current order value.",
    request_body = ReorderGalleryRequest,
    responses(
        (status = 204, description = "Gallery reordered"),
        (status = 400, description = "Empty or duplicate IDs (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown gallery item ID (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn reorder_gallery_items(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderGalleryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_reorder_gallery(&payload)?;

    let txn = state.db.begin().await?;

    let existing: HashSet<i32> = gallery_item::Entity::find()
        .filter(gallery_item::Column::Id.is_in(payload.gallery_item_ids.iter().copied()))
        .select_only()
        .column(gallery_item::Column::Id)
        .into_tuple::<i32>()
        .all(&txn)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = payload
        .gallery_item_ids
        .iter()
        .find(|id| !existing.contains(*id))
    {
        return Err(AppError::NotFound(format!(
            "Gallery item {missing} not found"
        )));
    }

    let now = chrono::Utc::now();
    for (i, &item_id) in payload.gallery_item_ids.iter().enumerate() {
        gallery_item::Entity::update_many()
            .filter(gallery_item::Column::Id.eq(item_id))
            .col_expr(
                gallery_item::Column::DisplayOrder,
                Expr::value(i32::try_from(i).map_err(|_| {
                    AppError::Validation("Too many gallery items to reorder".into())
                })?),
            )
            .col_expr(gallery_item::Column::UpdatedAt, Expr::value(now))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "listPublicGallery",
    summary = "List the public gallery",
    responses(
        (status = 200, description = "Gallery items", body = Vec<GalleryItemResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_public_gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    Ok(Json(load_gallery(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicGalleryItem",
    summary = "Get a public gallery item",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_public_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GalleryItemResponse>, AppError> {
    Ok(Json(find_gallery_item(&state.db, id).await?.into()))
}

async fn load_gallery<C: ConnectionTrait>(db: &C) -> Result<Vec<GalleryItemResponse>, AppError> {
    let items = gallery_item::Entity::find()
        .order_by_asc(gallery_item::Column::DisplayOrder)
        .order_by_asc(gallery_item::Column::Id)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

async fn find_gallery_item<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<gallery_item::Model, AppError> {
    gallery_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".into()))
}

async fn next_display_order<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let max_order: Option<i32> = gallery_item::Entity::find()
        .select_only()
        .column_as(gallery_item::Column::DisplayOrder.max(), "max_order")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    max_order
        .unwrap_or(-1)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Display order overflow".into()))
}
