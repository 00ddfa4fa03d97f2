use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::about_us;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::about_us::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "About Us",
    operation_id = "getAboutUs",
    summary = "Get the company profile",
    description = "Returns the stored profile, or an empty one when none has been saved yet.",
    responses(
        (status = 200, description = "Company profile", body = AboutUsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_about_us(
    State(state): State<AppState>,
) -> Result<Json<AboutUsResponse>, AppError> {
    Ok(Json(load_profile(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "About Us",
    operation_id = "upsertAboutUs",
    summary = "Create or replace the company profile",
    description = "Replaces every field of the profile, creating it on first use. \
        Omitted fields are cleared.",
    request_body = UpsertAboutUsRequest,
    responses(
        (status = 200, description = "Profile saved", body = AboutUsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn upsert_about_us(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertAboutUsRequest>,
) -> Result<Json<AboutUsResponse>, AppError> {
    validate_upsert_about_us(&payload)?;

    let txn = state.db.begin().await?;
    let existing = about_us::Entity::find()
        .order_by_asc(about_us::Column::Id)
        .one(&txn)
        .await?;

    let mut active = match existing {
        Some(model) => model.into(),
        None => about_us::ActiveModel::new(),
    };
    active.company_name = Set(payload.company_name);
    active.company_description = Set(payload.company_description);
    active.owner_name = Set(payload.owner_name);
    active.owner_title = Set(payload.owner_title);
    active.owner_description = Set(payload.owner_description);
    active.owner_image_url = Set(payload.owner_image_url);
    active.introduction = Set(payload.introduction);
    active.management_team = Set(payload.management_team);
    active.milestones = Set(payload.milestones);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.save(&txn).await?.try_into_model()?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "getPublicAboutUs",
    summary = "Get the public company profile",
    responses(
        (status = 200, description = "Company profile", body = AboutUsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_public_about_us(
    State(state): State<AppState>,
) -> Result<Json<AboutUsResponse>, AppError> {
    Ok(Json(load_profile(&state.db).await?))
}

/// The first profile row, or an empty profile.
async fn load_profile<C: ConnectionTrait>(db: &C) -> Result<AboutUsResponse, AppError> {
    let profile = about_us::Entity::find()
        .order_by_asc(about_us::Column::Id)
        .one(db)
        .await?;
    Ok(profile.map(Into::into).unwrap_or_default())
}
