use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::news_item;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{
    double_option, validate_name, validate_optional_position, validate_optional_url,
    validate_title, validate_url,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateNewsRequest {
    #[schema(example = "Summer promotion")]
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    #[schema(example = "promotion")]
    pub category: String,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
    /// Defaults to `true`.
    pub is_published: Option<bool>,
    pub expire_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub thumbnail_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub content: Option<Option<String>>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expire_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub author: Option<Option<String>>,
}

/// Query parameters for the admin news listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NewsListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Exact category match.
    pub category: Option<String>,
}

/// Query parameters for the public news listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PublicNewsListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Exact category match.
    pub category: Option<String>,
    /// Only featured (`true`) or non-featured (`false`) items.
    pub featured: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NewsResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: String,
    pub display_order: i32,
    pub is_featured: bool,
    pub is_published: bool,
    pub expire_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NewsListResponse {
    pub data: Vec<NewsResponse>,
    pub pagination: Pagination,
}

impl From<news_item::Model> for NewsResponse {
    fn from(m: news_item::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image_url: m.image_url,
            thumbnail_url: m.thumbnail_url,
            description: m.description,
            content: m.content,
            category: m.category,
            display_order: m.display_order,
            is_featured: m.is_featured,
            is_published: m.is_published,
            expire_date: m.expire_date,
            author: m.author,
            view_count: m.view_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_news(req: &CreateNewsRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_url(&req.image_url, "image_url")?;
    validate_optional_url(req.thumbnail_url.as_deref(), "thumbnail_url")?;
    validate_name(&req.category, "Category")?;
    validate_optional_position(req.display_order)
}

pub fn validate_update_news(req: &UpdateNewsRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref url) = req.image_url {
        validate_url(url, "image_url")?;
    }
    validate_optional_url(
        req.thumbnail_url.as_ref().and_then(|u| u.as_deref()),
        "thumbnail_url",
    )?;
    if let Some(ref category) = req.category {
        validate_name(category, "Category")?;
    }
    validate_optional_position(req.display_order)
}
