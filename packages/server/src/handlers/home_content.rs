use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::home_content;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::home_content::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Home Content",
    operation_id = "getHomeContent",
    summary = "Get the home page blocks",
    description = "Returns the stored blocks, or empty ones when none have been saved yet.",
    responses(
        (status = 200, description = "Home page blocks", body = HomeContentResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_home_content(
    State(state): State<AppState>,
) -> Result<Json<HomeContentResponse>, AppError> {
    Ok(Json(load_home_content(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Home Content",
    operation_id = "upsertHomeContent",
    summary = "Create or replace the home page blocks",
    description = "Replaces every block, creating the record on first use. Omitted blocks are cleared, \
        which releases any assets only they referenced.",
    request_body = UpsertHomeContentRequest,
    responses(
        (status = 200, description = "Home page blocks saved", body = HomeContentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn upsert_home_content(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertHomeContentRequest>,
) -> Result<Json<HomeContentResponse>, AppError> {
    validate_upsert_home_content(&payload)?;

    let txn = state.db.begin().await?;
    let existing = home_content::Entity::find()
        .order_by_asc(home_content::Column::Id)
        .one(&txn)
        .await?;

    let mut active = match existing {
        Some(model) => model.into(),
        None => home_content::ActiveModel::new(),
    };
    active.welcome_message = Set(payload.welcome_message);
    active.short_paragraph = Set(payload.short_paragraph);
    active.our_brands = Set(payload.our_brands);
    active.our_customers = Set(payload.our_customers);
    active.our_platforms = Set(payload.our_platforms);
    active.recommendations = Set(payload.recommendations);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.save(&txn).await?.try_into_model()?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "getPublicHomeContent",
    summary = "Get the public home page blocks",
    responses(
        (status = 200, description = "Home page blocks", body = HomeContentResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_public_home_content(
    State(state): State<AppState>,
) -> Result<Json<HomeContentResponse>, AppError> {
    Ok(Json(load_home_content(&state.db).await?))
}

async fn load_home_content<C: ConnectionTrait>(db: &C) -> Result<HomeContentResponse, AppError> {
    let content = home_content::Entity::find()
        .order_by_asc(home_content::Column::Id)
        .one(db)
        .await?;
    Ok(content.map(Into::into).unwrap_or_default())
}
