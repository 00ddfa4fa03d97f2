use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::product;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::product::*;
use crate::models::shared::{page_offset, page_params, trim_optional};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Products",
    operation_id = "createProduct",
    summary = "Create a product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_product(&payload)?;

    let now = chrono::Utc::now();
    let model = product::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        capacity: Set(trim_optional(payload.capacity)),
        price_cents: Set(payload.price_cents),
        brand: Set(trim_optional(payload.brand)),
        category: Set(trim_optional(payload.category)),
        warranty: Set(trim_optional(payload.warranty)),
        image_url_1: Set(payload.image_url_1),
        image_url_2: Set(payload.image_url_2),
        image_url_3: Set(payload.image_url_3),
        image_url_4: Set(payload.image_url_4),
        image_url_5: Set(payload.image_url_5),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List products with pagination and filters",
    description = "Newest first. `search` is a case-insensitive substring match on the name; \
        `category` and `brand` match exactly.",
    params(ProductListQuery),
    responses(
        (status = 200, description = "List of products", body = ProductListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    Ok(Json(query_products(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    operation_id = "getProduct",
    summary = "Get a product by ID",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(find_product(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    operation_id = "updateProduct",
    summary = "Update a product",
    description = "Partially updates a product. Nullable fields accept `null` to clear them; \
        clearing an image field releases its asset to the next unused-asset sweep.",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    validate_update_product(&payload)?;

    if payload == UpdateProductRequest::default() {
        let existing = find_product(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let mut active: product::ActiveModel = find_product(&txn, id).await?.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(capacity) = payload.capacity {
        active.capacity = Set(trim_optional(capacity));
    }
    if let Some(price) = payload.price_cents {
        active.price_cents = Set(price);
    }
    if let Some(brand) = payload.brand {
        active.brand = Set(trim_optional(brand));
    }
    if let Some(category) = payload.category {
        active.category = Set(trim_optional(category));
    }
    if let Some(warranty) = payload.warranty {
        active.warranty = Set(trim_optional(warranty));
    }
    if let Some(url) = payload.image_url_1 {
        active.image_url_1 = Set(url);
    }
    if let Some(url) = payload.image_url_2 {
        active.image_url_2 = Set(url);
    }
    if let Some(url) = payload.image_url_3 {
        active.image_url_3 = Set(url);
    }
    if let Some(url) = payload.image_url_4 {
        active.image_url_4 = Set(url);
    }
    if let Some(url) = payload.image_url_5 {
        active.image_url_5 = Set(url);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    operation_id = "deleteProduct",
    summary = "Delete a product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = product::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "listPublicProducts",
    summary = "List products for the public site",
    params(ProductListQuery),
    responses(
        (status = 200, description = "List of products", body = ProductListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_public_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    Ok(Json(query_products(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Public",
    operation_id = "getPublicProduct",
    summary = "Get a product for the public site",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_public_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(find_product(&state.db, id).await?.into()))
}

async fn query_products<C: ConnectionTrait>(
    db: &C,
    query: ProductListQuery,
) -> Result<ProductListResponse, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);
    let offset = page_offset(page, per_page)?;

    let mut select = product::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }
    if let Some(category) = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        select = select.filter(product::Column::Category.eq(category));
    }
    if let Some(brand) = query.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        select = select.filter(product::Column::Brand.eq(brand));
    }

    let total = select.clone().paginate(db, per_page).num_items().await?;

    let data = select
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .offset(Some(offset))
        .limit(Some(per_page))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ProductListResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    })
}

async fn find_product<C: ConnectionTrait>(db: &C, id: i32) -> Result<product::Model, AppError> {
    product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
}
