use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, IntoCondition, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::blog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::models::shared::{escape_like, page_offset, page_params, slugify};
use crate::state::AppState;

/// Number of posts returned by the recent-posts endpoint.
const RECENT_LIMIT: u64 = 10;

fn duplicate_slug(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A blog post with this slug already exists".into())
        }
        _ => AppError::from(e),
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog post",
    description = "Creates a post, published by default. Without a `slug` one is derived from the topic.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog post created", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(topic = %payload.topic))]
pub async fn create_blog(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog(&payload)?;

    let slug = match payload.slug {
        Some(slug) => slug,
        None => derive_slug(&payload.topic)?,
    };

    let now = chrono::Utc::now();
    let model = blog::ActiveModel {
        topic: Set(payload.topic.trim().to_string()),
        date: Set(payload.date),
        division: Set(payload.division.trim().to_string()),
        image_url: Set(payload.image_url),
        short_description: Set(payload.short_description),
        paragraph: Set(payload.paragraph),
        slug: Set(slug),
        is_published: Set(payload.is_published.unwrap_or(true)),
        view_count: Set(0),
        display_order: Set(payload.display_order.unwrap_or(0)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(duplicate_slug)?;

    Ok((StatusCode::CREATED, Json(BlogResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blog posts",
    description = "Newest post date first, including unpublished posts.",
    params(BlogListQuery),
    responses(
        (status = 200, description = "List of blog posts", body = BlogListResponse),
        (status = 400, description = "Invalid filters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, AppError> {
    Ok(Json(query_blogs(&state.db, query, false).await?))
}

#[utoipa::path(
    get,
    path = "/divisions",
    tag = "Blogs",
    operation_id = "listBlogDivisions",
    summary = "List blog divisions",
    description = "Distinct division names across all posts, sorted.",
    responses(
        (status = 200, description = "Division names", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_divisions(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(distinct_divisions(&state.db, false).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog post by ID",
    description = "Does not count as a view.",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    Ok(Json(find_blog(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog post",
    params(("id" = i32, Path, description = "Blog post ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog post updated", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    validate_update_blog(&payload)?;

    if payload == UpdateBlogRequest::default() {
        let existing = find_blog(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: blog::ActiveModel = find_blog(&txn, id).await?.into();

    if let Some(ref topic) = payload.topic {
        active.topic = Set(topic.trim().to_string());
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(ref division) = payload.division {
        active.division = Set(division.trim().to_string());
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(text) = payload.short_description {
        active.short_description = Set(text);
    }
    if let Some(text) = payload.paragraph {
        active.paragraph = Set(text);
    }
    if let Some(slug) = payload.slug {
        active.slug = Set(slug);
    }
    if let Some(published) = payload.is_published {
        active.is_published = Set(published);
    }
    if let Some(order) = payload.display_order {
        active.display_order = Set(order);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(duplicate_slug)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}/toggle-publish",
    tag = "Blogs",
    operation_id = "toggleBlogPublished",
    summary = "Flip a blog post's published flag",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post updated", body = BlogResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn toggle_blog_published(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_blog(&txn, id).await?;
    let published = !existing.is_published;

    let mut active: blog::ActiveModel = existing.into();
    active.is_published = Set(published);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog post",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 204, description = "Blog post deleted"),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = blog::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Blog post not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "listPublicBlogs",
    summary = "List published blog posts",
    params(BlogListQuery),
    responses(
        (status = 200, description = "List of blog posts", body = BlogListResponse),
        (status = 400, description = "Invalid filters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_public_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, AppError> {
    Ok(Json(query_blogs(&state.db, query, true).await?))
}

#[utoipa::path(
    get,
    path = "/recent",
    tag = "Public",
    operation_id = "listRecentBlogs",
    summary = "Latest published blog posts",
    description = "Up to ten published posts, newest first.",
    responses(
        (status = 200, description = "Blog posts", body = Vec<BlogResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_recent_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let posts = newest_first(blog::Entity::find().filter(blog::Column::IsPublished.eq(true)))
        .limit(RECENT_LIMIT)
        .all(&state.db)
        .await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/divisions",
    tag = "Public",
    operation_id = "listPublicBlogDivisions",
    summary = "Divisions with published posts",
    responses(
        (status = 200, description = "Division names", body = Vec<String>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_public_blog_divisions(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(distinct_divisions(&state.db, true).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicBlog",
    summary = "Read a published blog post",
    description = "Counts a view. Unpublished posts are reported as not found.",
    params(("id" = i32, Path, description = "Blog post ID")),
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_public_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    Ok(Json(read_published(&state.db, blog::Column::Id.eq(id)).await?.into()))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Public",
    operation_id = "getPublicBlogBySlug",
    summary = "Read a published blog post by slug",
    description = "Counts a view. Unpublished posts are reported as not found.",
    params(("slug" = String, Path, description = "Blog post slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogResponse),
        (status = 404, description = "Blog post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn get_public_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    Ok(Json(
        read_published(&state.db, blog::Column::Slug.eq(slug)).await?.into(),
    ))
}

fn derive_slug(topic: &str) -> Result<String, AppError> {
    let slug = slugify(topic);
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Cannot derive a slug from this topic; provide one".into(),
        ));
    }
    Ok(slug)
}

fn newest_first(select: Select<blog::Entity>) -> Select<blog::Entity> {
    select
        .order_by_desc(blog::Column::Date)
        .order_by_desc(blog::Column::CreatedAt)
        .order_by_desc(blog::Column::Id)
}

async fn query_blogs<C: ConnectionTrait>(
    db: &C,
    query: BlogListQuery,
    published_only: bool,
) -> Result<BlogListResponse, AppError> {
    validate_blog_query(&query)?;
    let (page, per_page) = page_params(query.page, query.per_page);
    let offset = page_offset(page, per_page)?;

    let mut select = blog::Entity::find();
    if published_only {
        select = select.filter(blog::Column::IsPublished.eq(true));
    }
    if let Some(division) = query.division.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        select = select.filter(blog::Column::Division.eq(division));
    }
    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            let mut any = Condition::any();
            for column in [
                blog::Column::Topic,
                blog::Column::ShortDescription,
                blog::Column::Paragraph,
            ] {
                any = any.add(
                    Expr::expr(Func::lower(Expr::col(column)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                );
            }
            select = select.filter(any);
        }
    }
    if let Some(start) = query.start_date {
        select = select.filter(blog::Column::Date.gte(start));
    }
    if let Some(end) = query.end_date {
        select = select.filter(blog::Column::Date.lte(end));
    }

    let total = select.clone().paginate(db, per_page).num_items().await?;
    let data = newest_first(select)
        .offset(Some(offset))
        .limit(Some(per_page))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(BlogListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    })
}

async fn distinct_divisions<C: ConnectionTrait>(
    db: &C,
    published_only: bool,
) -> Result<Vec<String>, AppError> {
    let mut select = blog::Entity::find();
    if published_only {
        select = select.filter(blog::Column::IsPublished.eq(true));
    }
    Ok(select
        .select_only()
        .column(blog::Column::Division)
        .distinct()
        .order_by_asc(blog::Column::Division)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

/// Count a view on the published post matching `key` and return it.
async fn read_published<C: TransactionTrait>(
    db: &C,
    key: impl IntoCondition + Clone,
) -> Result<blog::Model, AppError> {
    let txn = db.begin().await?;

    let result = blog::Entity::update_many()
        .filter(key.clone())
        .filter(blog::Column::IsPublished.eq(true))
        .col_expr(
            blog::Column::ViewCount,
            Expr::col(blog::Column::ViewCount).add(1),
        )
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Blog post not found".into()));
    }

    let model = blog::Entity::find()
        .filter(key)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;
    txn.commit().await?;

    Ok(model)
}

async fn find_blog<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog::Model, AppError> {
    blog::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}
