use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::product_category;
use crate::error::AppError;

use super::shared::{double_option, validate_name};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Split air conditioners")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<product_category::Model> for CategoryResponse {
    fn from(m: product_category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_category(req: &CreateCategoryRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Name")
}

pub fn validate_update_category(req: &UpdateCategoryRequest) -> Result<(), AppError> {
    match req.name {
        Some(ref name) => validate_name(name, "Name"),
        None => Ok(()),
    }
}
