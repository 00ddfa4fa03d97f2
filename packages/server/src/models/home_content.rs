use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::home_content;
use crate::error::AppError;

use super::shared::validate_json_array;

/// Full replacement of the home page blocks. Omitted fields are stored as null.
///
/// The list fields hold free-form items; any `/uploads/...` string inside
/// them keeps that asset alive.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct UpsertHomeContentRequest {
    #[schema(example = "Welcome to Cool Breeze")]
    pub welcome_message: Option<String>,
    pub short_paragraph: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub our_brands: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub our_customers: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub our_platforms: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub recommendations: Option<Value>,
}

/// Home page blocks. `id` and `updated_at` are null until first saved.
#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct HomeContentResponse {
    pub id: Option<i32>,
    pub welcome_message: Option<String>,
    pub short_paragraph: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub our_brands: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub our_customers: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub our_platforms: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub recommendations: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<home_content::Model> for HomeContentResponse {
    fn from(m: home_content::Model) -> Self {
        Self {
            id: Some(m.id),
            welcome_message: m.welcome_message,
            short_paragraph: m.short_paragraph,
            our_brands: m.our_brands,
            our_customers: m.our_customers,
            our_platforms: m.our_platforms,
            recommendations: m.recommendations,
            updated_at: Some(m.updated_at),
        }
    }
}

pub fn validate_upsert_home_content(req: &UpsertHomeContentRequest) -> Result<(), AppError> {
    validate_json_array(req.our_brands.as_ref(), "our_brands")?;
    validate_json_array(req.our_customers.as_ref(), "our_customers")?;
    validate_json_array(req.our_platforms.as_ref(), "our_platforms")?;
    validate_json_array(req.recommendations.as_ref(), "recommendations")
}
