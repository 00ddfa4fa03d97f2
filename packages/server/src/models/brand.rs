use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::brand;
use crate::error::AppError;

use super::shared::{double_option, validate_name, validate_optional_url};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBrandRequest {
    #[schema(example = "Daikin")]
    pub name: String,
    pub image_url: Option<String>,
    #[schema(example = "https://www.daikin.com")]
    pub link: Option<String>,
    pub description: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBrandRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BrandResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<brand::Model> for BrandResponse {
    fn from(m: brand::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            image_url: m.image_url,
            link: m.link,
            description: m.description,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_brand(req: &CreateBrandRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Name")?;
    validate_optional_url(req.image_url.as_deref(), "image_url")?;
    validate_optional_url(req.link.as_deref(), "link")
}

pub fn validate_update_brand(req: &UpdateBrandRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Name")?;
    }
    validate_optional_url(req.image_url.as_ref().and_then(|u| u.as_deref()), "image_url")?;
    validate_optional_url(req.link.as_ref().and_then(|u| u.as_deref()), "link")
}
