use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::news_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::news::*;
use crate::models::shared::{page_offset, page_params, trim_optional};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "News",
    operation_id = "createNews",
    summary = "Create a news item",
    description = "Creates a news item. Items are published by default.",
    request_body = CreateNewsRequest,
    responses(
        (status = 201, description = "News item created", body = NewsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_news(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateNewsRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_news(&payload)?;

    let now = chrono::Utc::now();
    let model = news_item::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        image_url: Set(payload.image_url),
        thumbnail_url: Set(payload.thumbnail_url),
        description: Set(payload.description),
        content: Set(payload.content),
        category: Set(payload.category.trim().to_string()),
        display_order: Set(payload.display_order.unwrap_or(0)),
        is_featured: Set(payload.is_featured.unwrap_or(false)),
        is_published: Set(payload.is_published.unwrap_or(true)),
        expire_date: Set(payload.expire_date),
        author: Set(trim_optional(payload.author)),
        view_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(NewsResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "News",
    operation_id = "listNews",
    summary = "List all news items",
    description = "Newest first, including unpublished and expired items.",
    params(NewsListQuery),
    responses(
        (status = 200, description = "List of news items", body = NewsListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let mut select = news_item::Entity::find();
    if let Some(category) = non_blank(query.category.as_deref()) {
        select = select.filter(news_item::Column::Category.eq(category));
    }
    let select = select
        .order_by_desc(news_item::Column::CreatedAt)
        .order_by_desc(news_item::Column::Id);

    Ok(Json(paginate_news(&state.db, select, page, per_page).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "News",
    operation_id = "getNews",
    summary = "Get a news item by ID",
    description = "Does not count as a view.",
    params(("id" = i32, Path, description = "News item ID")),
    responses(
        (status = 200, description = "News item", body = NewsResponse),
        (status = 404, description = "News item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NewsResponse>, AppError> {
    Ok(Json(find_news(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "News",
    operation_id = "updateNews",
    summary = "Update a news item",
    params(("id" = i32, Path, description = "News item ID")),
    request_body = UpdateNewsRequest,
    responses(
        (status = 200, description = "News item updated", body = NewsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "News item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateNewsRequest>,
) -> Result<Json<NewsResponse>, AppError> {
    validate_update_news(&payload)?;

    if payload == UpdateNewsRequest::default() {
        let existing = find_news(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: news_item::ActiveModel = find_news(&txn, id).await?.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(thumbnail_url) = payload.thumbnail_url {
        active.thumbnail_url = Set(thumbnail_url);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    if let Some(ref category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(order) = payload.display_order {
        active.display_order = Set(order);
    }
    if let Some(featured) = payload.is_featured {
        active.is_featured = Set(featured);
    }
    if let Some(published) = payload.is_published {
        active.is_published = Set(published);
    }
    if let Some(expire_date) = payload.expire_date {
        active.expire_date = Set(expire_date);
    }
    if let Some(author) = payload.author {
        active.author = Set(trim_optional(author));
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "News",
    operation_id = "deleteNews",
    summary = "Delete a news item",
    params(("id" = i32, Path, description = "News item ID")),
    responses(
        (status = 204, description = "News item deleted"),
        (status = 404, description = "News item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = news_item::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("News item not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "listPublicNews",
    summary = "List published news",
    description = "Published, non-expired items ordered by `display_order`, then newest first.",
    params(PublicNewsListQuery),
    responses(
        (status = 200, description = "List of news items", body = NewsListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_public_news(
    State(state): State<AppState>,
    Query(query): Query<PublicNewsListQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let mut select = news_item::Entity::find().filter(visible_condition());
    if let Some(category) = non_blank(query.category.as_deref()) {
        select = select.filter(news_item::Column::Category.eq(category));
    }
    if let Some(featured) = query.featured {
        select = select.filter(news_item::Column::IsFeatured.eq(featured));
    }
    let select = select
        .order_by_asc(news_item::Column::DisplayOrder)
        .order_by_desc(news_item::Column::CreatedAt)
        .order_by_desc(news_item::Column::Id);

    Ok(Json(paginate_news(&state.db, select, page, per_page).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicNews",
    summary = "Read a published news item",
    description = "Counts a view. Unpublished and expired items are reported as not found.",
    params(("id" = i32, Path, description = "News item ID")),
    responses(
        (status = 200, description = "News item", body = NewsResponse),
        (status = 404, description = "News item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_public_news(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NewsResponse>, AppError> {
    let txn = state.db.begin().await?;

    let result = news_item::Entity::update_many()
        .filter(news_item::Column::Id.eq(id))
        .filter(visible_condition())
        .col_expr(
            news_item::Column::ViewCount,
            Expr::col(news_item::Column::ViewCount).add(1),
        )
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("News item not found".into()));
    }

    let model = find_news(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

/// Published and not past its expiry.
fn visible_condition() -> Condition {
    Condition::all()
        .add(news_item::Column::IsPublished.eq(true))
        .add(
            Condition::any()
                .add(news_item::Column::ExpireDate.is_null())
                .add(news_item::Column::ExpireDate.gt(chrono::Utc::now())),
        )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn paginate_news<C: ConnectionTrait>(
    db: &C,
    select: Select<news_item::Entity>,
    page: u64,
    per_page: u64,
) -> Result<NewsListResponse, AppError> {
    let offset = page_offset(page, per_page)?;
    let total = select.clone().paginate(db, per_page).num_items().await?;
    let data = select
        .offset(Some(offset))
        .limit(Some(per_page))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(NewsListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    })
}

async fn find_news<C: ConnectionTrait>(db: &C, id: i32) -> Result<news_item::Model, AppError> {
    news_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("News item not found".into()))
}
