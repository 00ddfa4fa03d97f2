use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::product;
use crate::error::AppError;

pub use super::shared::{Pagination, escape_like};
use super::shared::{double_option, validate_name, validate_optional_url};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Inverter split AC 1.5HP")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "1.5HP")]
    pub capacity: Option<String>,
    /// Price in minor currency units.
    #[schema(example = 129900)]
    pub price_cents: Option<i64>,
    #[schema(example = "Daikin")]
    pub brand: Option<String>,
    #[schema(example = "air-conditioner")]
    pub category: Option<String>,
    #[schema(example = "2 years")]
    pub warranty: Option<String>,
    pub image_url_1: Option<String>,
    pub image_url_2: Option<String>,
    pub image_url_3: Option<String>,
    pub image_url_4: Option<String>,
    pub image_url_5: Option<String>,
}

/// Nullable fields accept `null` to clear the stored value.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub capacity: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub price_cents: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub warranty: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url_1: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url_2: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url_3: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url_4: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url_5: Option<Option<String>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ProductListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact brand match.
    pub brand: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<String>,
    pub price_cents: Option<i64>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub warranty: Option<String>,
    pub image_url_1: Option<String>,
    pub image_url_2: Option<String>,
    pub image_url_3: Option<String>,
    pub image_url_4: Option<String>,
    pub image_url_5: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<ProductResponse>,
    pub pagination: Pagination,
}

impl From<product::Model> for ProductResponse {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            capacity: m.capacity,
            price_cents: m.price_cents,
            brand: m.brand,
            category: m.category,
            warranty: m.warranty,
            image_url_1: m.image_url_1,
            image_url_2: m.image_url_2,
            image_url_3: m.image_url_3,
            image_url_4: m.image_url_4,
            image_url_5: m.image_url_5,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_price(price: Option<i64>) -> Result<(), AppError> {
    if let Some(price) = price
        && price < 0
    {
        return Err(AppError::Validation("Price must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_product(req: &CreateProductRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Name")?;
    validate_price(req.price_cents)?;
    for (field, url) in [
        ("image_url_1", &req.image_url_1),
        ("image_url_2", &req.image_url_2),
        ("image_url_3", &req.image_url_3),
        ("image_url_4", &req.image_url_4),
        ("image_url_5", &req.image_url_5),
    ] {
        validate_optional_url(url.as_deref(), field)?;
    }
    Ok(())
}

pub fn validate_update_product(req: &UpdateProductRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Name")?;
    }
    validate_price(req.price_cents.flatten())?;
    for (field, url) in [
        ("image_url_1", &req.image_url_1),
        ("image_url_2", &req.image_url_2),
        ("image_url_3", &req.image_url_3),
        ("image_url_4", &req.image_url_4),
        ("image_url_5", &req.image_url_5),
    ] {
        validate_optional_url(url.as_ref().and_then(|u| u.as_deref()), field)?;
    }
    Ok(())
}
