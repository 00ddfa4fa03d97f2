use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::brand;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::brand::*;
use crate::state::AppState;

fn duplicate_name(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A brand with this name already exists".into())
        }
        _ => AppError::from(e),
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Brands",
    operation_id = "createBrand",
    summary = "Create a brand",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_brand(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBrandRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_brand(&payload)?;

    let now = chrono::Utc::now();
    let model = brand::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        image_url: Set(payload.image_url),
        link: Set(payload.link),
        description: Set(payload.description),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(duplicate_name)?;

    Ok((StatusCode::CREATED, Json(BrandResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Brands",
    operation_id = "listBrands",
    summary = "List all brands",
    description = "Returns every brand, active or not, ordered by name.",
    responses(
        (status = 200, description = "Brands", body = Vec<BrandResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandResponse>>, AppError> {
    let brands = brand::Entity::find()
        .order_by_asc(brand::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(brands.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Brands",
    operation_id = "getBrand",
    summary = "Get a brand by ID",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 404, description = "Brand not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BrandResponse>, AppError> {
    Ok(Json(find_brand(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Brands",
    operation_id = "updateBrand",
    summary = "Update a brand",
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Brand not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBrandRequest>,
) -> Result<Json<BrandResponse>, AppError> {
    validate_update_brand(&payload)?;

    if payload == UpdateBrandRequest::default() {
        let existing = find_brand(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: brand::ActiveModel = find_brand(&txn, id).await?.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(link) = payload.link {
        active.link = Set(link);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(duplicate_name)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Brands",
    operation_id = "deleteBrand",
    summary = "Delete a brand",
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Brand not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = brand::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Brand not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "listPublicBrands",
    summary = "List active brands",
    responses(
        (status = 200, description = "Active brands", body = Vec<BrandResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_public_brands(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandResponse>>, AppError> {
    let brands = brand::Entity::find()
        .filter(brand::Column::IsActive.eq(true))
        .order_by_asc(brand::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(brands.into_iter().map(Into::into).collect()))
}

async fn find_brand<C: ConnectionTrait>(db: &C, id: i32) -> Result<brand::Model, AppError> {
    brand::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Brand not found".into()))
}
