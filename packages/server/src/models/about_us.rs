use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::about_us;
use crate::error::AppError;

use super::shared::{validate_json_array, validate_optional_url};

/// Full replacement of the company profile. Omitted fields are stored as null.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct UpsertAboutUsRequest {
    #[schema(example = "Cool Breeze Trading")]
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub owner_name: Option<String>,
    pub owner_title: Option<String>,
    pub owner_description: Option<String>,
    pub owner_image_url: Option<String>,
    pub introduction: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub management_team: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub milestones: Option<Value>,
}

/// Company profile. `id` and `updated_at` are null until the profile is first saved.
#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct AboutUsResponse {
    pub id: Option<i32>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub owner_name: Option<String>,
    pub owner_title: Option<String>,
    pub owner_description: Option<String>,
    pub owner_image_url: Option<String>,
    pub introduction: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub management_team: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub milestones: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<about_us::Model> for AboutUsResponse {
    fn from(m: about_us::Model) -> Self {
        Self {
            id: Some(m.id),
            company_name: m.company_name,
            company_description: m.company_description,
            owner_name: m.owner_name,
            owner_title: m.owner_title,
            owner_description: m.owner_description,
            owner_image_url: m.owner_image_url,
            introduction: m.introduction,
            management_team: m.management_team,
            milestones: m.milestones,
            updated_at: Some(m.updated_at),
        }
    }
}

pub fn validate_upsert_about_us(req: &UpsertAboutUsRequest) -> Result<(), AppError> {
    validate_optional_url(req.owner_image_url.as_deref(), "owner_image_url")?;
    validate_json_array(req.management_team.as_ref(), "management_team")?;
    validate_json_array(req.milestones.as_ref(), "milestones")
}
