use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contact_info;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::contact_info::*;
use crate::models::shared::trim_optional;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Contact",
    operation_id = "getContactInfo",
    summary = "Get the contact details",
    description = "Returns the stored details, or empty ones when none have been saved yet.",
    responses(
        (status = 200, description = "Contact details", body = ContactInfoResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_contact_info(
    State(state): State<AppState>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    Ok(Json(load_contact_info(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Contact",
    operation_id = "upsertContactInfo",
    summary = "Create or replace the contact details",
    description = "Replaces every field, creating the record on first use. Omitted fields are cleared.",
    request_body = UpsertContactInfoRequest,
    responses(
        (status = 200, description = "Contact details saved", body = ContactInfoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn upsert_contact_info(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertContactInfoRequest>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    validate_upsert_contact_info(&payload)?;

    let txn = state.db.begin().await?;
    let existing = contact_info::Entity::find()
        .order_by_asc(contact_info::Column::Id)
        .one(&txn)
        .await?;

    let mut active = match existing {
        Some(model) => model.into(),
        None => contact_info::ActiveModel::new(),
    };
    active.email = Set(trim_optional(payload.email));
    active.phone = Set(trim_optional(payload.phone));
    active.address = Set(payload.address);
    active.facebook_url = Set(trim_optional(payload.facebook_url));
    active.twitter_url = Set(trim_optional(payload.twitter_url));
    active.instagram_url = Set(trim_optional(payload.instagram_url));
    active.linkedin_url = Set(trim_optional(payload.linkedin_url));
    active.updated_at = Set(chrono::Utc::now());

    let model = active.save(&txn).await?.try_into_model()?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    operation_id = "getPublicContactInfo",
    summary = "Get the public contact details",
    responses(
        (status = 200, description = "Contact details", body = ContactInfoResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_public_contact_info(
    State(state): State<AppState>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    Ok(Json(load_contact_info(&state.db).await?))
}

async fn load_contact_info<C: ConnectionTrait>(db: &C) -> Result<ContactInfoResponse, AppError> {
    let info = contact_info::Entity::find()
        .order_by_asc(contact_info::Column::Id)
        .one(db)
        .await?;
    Ok(info.map(Into::into).unwrap_or_default())
}
