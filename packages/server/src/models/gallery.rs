use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::gallery_item;
use crate::error::AppError;

use super::shared::{
    double_option, validate_optional_position, validate_reorder_ids, validate_title, validate_url,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateGalleryItemRequest {
    #[schema(example = "Showroom opening")]
    pub title: String,
    #[schema(example = "/uploads/3f0c6a6e-7d1f-4f7e-9a56-0d1c1a1e2b3c.jpg")]
    pub image_url: String,
    pub description: Option<String>,
    #[schema(example = "events")]
    pub category: Option<String>,
    /// Defaults to the end of the list.
    pub display_order: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateGalleryItemRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderGalleryRequest {
    /// Ordered gallery item IDs. `display_order` is assigned 0, 1, 2, ... by array index.
    pub gallery_item_ids: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GalleryItemResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<gallery_item::Model> for GalleryItemResponse {
    fn from(m: gallery_item::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image_url: m.image_url,
            description: m.description,
            category: m.category,
            display_order: m.display_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_gallery_item(req: &CreateGalleryItemRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_url(&req.image_url, "image_url")?;
    validate_optional_position(req.display_order)
}

pub fn validate_update_gallery_item(req: &UpdateGalleryItemRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref url) = req.image_url {
        validate_url(url, "image_url")?;
    }
    validate_optional_position(req.display_order)
}

pub fn validate_reorder_gallery(req: &ReorderGalleryRequest) -> Result<(), AppError> {
    validate_reorder_ids(&req.gallery_item_ids, "gallery_item_id")
}
