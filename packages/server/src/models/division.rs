use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::division;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{
    double_option, validate_json_array, validate_json_object, validate_name,
    validate_optional_position, validate_reorder_ids, validate_slug,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DivisionStatus {
    Active,
    Inactive,
}

impl DivisionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DivisionStatus::Active => "active",
            DivisionStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DivisionStatus::Active => DivisionStatus::Inactive,
            DivisionStatus::Inactive => DivisionStatus::Active,
        }
    }

    /// Anything other than `active` in storage counts as inactive.
    pub fn from_stored(value: &str) -> Self {
        if value == "active" {
            DivisionStatus::Active
        } else {
            DivisionStatus::Inactive
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDivisionRequest {
    #[schema(example = "IND_SOLAR_001")]
    pub id: String,
    #[schema(example = "Solar Energy")]
    pub name: String,
    #[schema(example = "solar-energy")]
    pub slug: String,
    pub status: DivisionStatus,
    pub display_order: Option<i32>,
    /// Object with descriptions and a banner image.
    #[schema(value_type = Option<Object>)]
    pub basic_info: Option<Value>,
    /// List of sub-division sections.
    #[schema(value_type = Option<Object>)]
    pub sub_divisions: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub contact_us: Option<Value>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateDivisionRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub status: Option<DivisionStatus>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Object>)]
    pub basic_info: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Object>)]
    pub sub_divisions: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Object>)]
    pub contact_us: Option<Option<Value>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderDivisionsRequest {
    /// Ordered division IDs. `display_order` is assigned 0, 1, 2, ... by array index.
    pub division_ids: Vec<String>,
}

/// Query parameters for the paginated division listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct DivisionListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DivisionResponse {
    #[schema(example = "IND_SOLAR_001")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: DivisionStatus,
    pub display_order: i32,
    #[schema(value_type = Option<Object>)]
    pub basic_info: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub sub_divisions: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub contact_us: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DivisionListResponse {
    pub data: Vec<DivisionResponse>,
    pub pagination: Pagination,
}

impl From<division::Model> for DivisionResponse {
    fn from(m: division::Model) -> Self {
        Self {
            status: DivisionStatus::from_stored(&m.status),
            id: m.id,
            name: m.name,
            slug: m.slug,
            display_order: m.display_order,
            basic_info: m.basic_info,
            sub_divisions: m.sub_divisions,
            contact_us: m.contact_us,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Division IDs: 1-64 ASCII letters, digits, `_` or `-`.
pub fn validate_division_id(id: &str) -> Result<(), AppError> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !valid {
        return Err(AppError::Validation(
            "Division ID must be 1-64 letters, digits, '_' or '-'".into(),
        ));
    }
    Ok(())
}

fn validate_sections(
    basic_info: Option<&Value>,
    sub_divisions: Option<&Value>,
    contact_us: Option<&Value>,
) -> Result<(), AppError> {
    validate_json_object(basic_info, "basic_info")?;
    validate_json_array(sub_divisions, "sub_divisions")?;
    validate_json_object(contact_us, "contact_us")
}

pub fn validate_create_division(req: &CreateDivisionRequest) -> Result<(), AppError> {
    validate_division_id(&req.id)?;
    validate_name(&req.name, "Name")?;
    validate_slug(&req.slug)?;
    validate_optional_position(req.display_order)?;
    validate_sections(
        req.basic_info.as_ref(),
        req.sub_divisions.as_ref(),
        req.contact_us.as_ref(),
    )
}

pub fn validate_update_division(req: &UpdateDivisionRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Name")?;
    }
    if let Some(ref slug) = req.slug {
        validate_slug(slug)?;
    }
    validate_optional_position(req.display_order)?;
    validate_sections(
        req.basic_info.as_ref().and_then(Option::as_ref),
        req.sub_divisions.as_ref().and_then(Option::as_ref),
        req.contact_us.as_ref().and_then(Option::as_ref),
    )
}

pub fn validate_reorder_divisions(req: &ReorderDivisionsRequest) -> Result<(), AppError> {
    validate_reorder_ids(&req.division_ids, "division_id")
}
