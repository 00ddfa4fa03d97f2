use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::IntoCondition;
use sea_orm::*;
use tracing::instrument;

use crate::entity::division;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::division::*;
use crate::models::shared::{page_offset, page_params};
use crate::state::AppState;

fn duplicate_key(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A division with this ID or slug already exists".into())
        }
        _ => AppError::from(e),
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Divisions",
    operation_id = "createDivision",
    summary = "Create a division",
    description = "Images referenced anywhere inside `basic_info`, `sub_divisions` or `contact_us` \
        count as in use.",
    request_body = CreateDivisionRequest,
    responses(
        (status = 201, description = "Division created", body = DivisionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "ID or slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %payload.id))]
pub async fn create_division(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDivisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_division(&payload)?;

    let txn = state.db.begin().await?;
    if division::Entity::find_by_id(payload.id.clone())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A division with this ID already exists".into(),
        ));
    }

    let now = chrono::Utc::now();
    let model = division::ActiveModel {
        id: Set(payload.id),
        name: Set(payload.name.trim().to_string()),
        slug: Set(payload.slug),
        status: Set(payload.status.as_str().to_string()),
        display_order: Set(payload.display_order.unwrap_or(0)),
        basic_info: Set(payload.basic_info),
        sub_divisions: Set(payload.sub_divisions),
        contact_us: Set(payload.contact_us),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(duplicate_key)?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(DivisionResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Divisions",
    operation_id = "listDivisions",
    summary = "List divisions, paginated",
    description = "All divisions ordered by `display_order`.",
    params(DivisionListQuery),
    responses(
        (status = 200, description = "List of divisions", body = DivisionListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_divisions(
    State(state): State<AppState>,
    Query(query): Query<DivisionListQuery>,
) -> Result<Json<DivisionListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);
    let offset = page_offset(page, per_page)?;

    let select = in_display_order(division::Entity::find());
    let total = select.clone().paginate(&state.db, per_page).num_items().await?;
    let data = select
        .offset(Some(offset))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DivisionListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = "Divisions",
    operation_id = "listAllDivisions",
    summary = "List every division",
    description = "Unpaginated, for building a reorder list.",
    responses(
        (status = 200, description = "Divisions", body = Vec<DivisionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_all_divisions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DivisionResponse>>, AppError> {
    let divisions = in_display_order(division::Entity::find())
        .all(&state.db)
        .await?;
    Ok(Json(divisions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Divisions",
    operation_id = "getDivision",
    summary = "Get a division by ID",
    params(("id" = String, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Division", body = DivisionResponse),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_division(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DivisionResponse>, AppError> {
    Ok(Json(find_division(&state.db, &id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Divisions",
    operation_id = "updateDivision",
    summary = "Update a division",
    description = "Setting a section to `null` clears it and releases the images only it referenced.",
    params(("id" = String, Path, description = "Division ID")),
    request_body = UpdateDivisionRequest,
    responses(
        (status = 200, description = "Division updated", body = DivisionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_division(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateDivisionRequest>,
) -> Result<Json<DivisionResponse>, AppError> {
    validate_update_division(&payload)?;

    if payload == UpdateDivisionRequest::default() {
        let existing = find_division(&state.db, &id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: division::ActiveModel = find_division(&txn, &id).await?.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(slug) = payload.slug {
        active.slug = Set(slug);
    }
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().to_string());
    }
    if let Some(order) = payload.display_order {
        active.display_order = Set(order);
    }
    if let Some(basic_info) = payload.basic_info {
        active.basic_info = Set(basic_info);
    }
    if let Some(sub_divisions) = payload.sub_divisions {
        active.sub_divisions = Set(sub_divisions);
    }
    if let Some(contact_us) = payload.contact_us {
        active.contact_us = Set(contact_us);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(duplicate_key)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}/toggle-status",
    tag = "Divisions",
    operation_id = "toggleDivisionStatus",
    summary = "Switch a division between active and inactive",
    params(("id" = String, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Division updated", body = DivisionResponse),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn toggle_division_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DivisionResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_division(&txn, &id).await?;
    let status = DivisionStatus::from_stored(&existing.status).toggled();

    let mut active: division::ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Divisions",
    operation_id = "deleteDivision",
    summary = "Delete a division",
    params(("id" = String, Path, description = "Division ID")),
    responses(
        (status = 204, description = "Division deleted"),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_division(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = division::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Division not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/reorder",
    tag = "Divisions",
    operation_id = "reorderDivisions",
    summary = "Reorder divisions",
    description = "Assigns `display_order` 0, 1, 2, ... following the order of `division_ids`. \
        Divisions not listed keep their current order value.",
    request_body = ReorderDivisionsRequest,
    responses(
        (status = 204, description = "Divisions reordered"),
        (status = 400, description = "Empty or duplicate IDs (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown division ID (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn reorder_divisions(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderDivisionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_reorder_divisions(&payload)?;

    let txn = state.db.begin().await?;

    let existing: HashSet<String> = division::Entity::find()
        .filter(division::Column::Id.is_in(payload.division_ids.iter().cloned()))
        .select_only()
        .column(division::Column::Id)
        .into_tuple::<String>()
        .all(&txn)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = payload
        .division_ids
        .iter()
        .find(|id| !existing.contains(id.as_str()))
    {
        return Err(AppError::NotFound(format!("Division {missing} not found")));
    }

    let now = chrono::Utc::now();
    for (i, division_id) in payload.division_ids.iter().enumerate() {
        division::Entity::update_many()
            .filter(division::Column::Id.eq(division_id.as_str()))
            .col_expr(
                division::Column::DisplayOrder,
                Expr::value(i32::try_from(i).map_err(|_| {
                    AppError::Validation("Too many divisions to reorder".into())
                })?),
            )
            .col_expr(division::Column::UpdatedAt, Expr::value(now))
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
    operation_id = "listPublicDivisions",
    summary = "List active divisions",
    responses(
        (status = 200, description = "Active divisions", body = Vec<DivisionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_public_divisions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DivisionResponse>>, AppError> {
    let divisions = in_display_order(division::Entity::find().filter(active_condition()))
        .all(&state.db)
        .await?;
    Ok(Json(divisions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicDivision",
    summary = "Get an active division",
    description = "Inactive divisions are reported as not found.",
    params(("id" = String, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Division", body = DivisionResponse),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_public_division(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DivisionResponse>, AppError> {
    Ok(Json(
        find_active(&state.db, division::Column::Id.eq(id)).await?.into(),
    ))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Public",
    operation_id = "getPublicDivisionBySlug",
    summary = "Get an active division by slug",
    description = "Inactive divisions are reported as not found.",
    params(("slug" = String, Path, description = "Division slug")),
    responses(
        (status = 200, description = "Division", body = DivisionResponse),
        (status = 404, description = "Division not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn get_public_division_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DivisionResponse>, AppError> {
    Ok(Json(
        find_active(&state.db, division::Column::Slug.eq(slug)).await?.into(),
    ))
}

fn active_condition() -> Condition {
    Condition::all().add(division::Column::Status.eq(DivisionStatus::Active.as_str()))
}

fn in_display_order(select: Select<division::Entity>) -> Select<division::Entity> {
    select
        .order_by_asc(division::Column::DisplayOrder)
        .order_by_asc(division::Column::Id)
}

async fn find_active<C: ConnectionTrait>(
    db: &C,
    key: impl IntoCondition,
) -> Result<division::Model, AppError> {
    division::Entity::find()
        .filter(key)
        .filter(active_condition())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Division not found".into()))
}

async fn find_division<C: ConnectionTrait>(db: &C, id: &str) -> Result<division::Model, AppError> {
    division::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Division not found".into()))
}
