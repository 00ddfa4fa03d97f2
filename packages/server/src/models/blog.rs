use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::blog;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{
    validate_name, validate_optional_position, validate_slug, validate_title, validate_url,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Solar panel installation guide")]
    pub topic: String,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    #[schema(example = "Solar")]
    pub division: String,
    pub image_url: String,
    pub short_description: String,
    pub paragraph: String,
    /// Derived from `topic` when omitted.
    pub slug: Option<String>,
    /// Defaults to `true`.
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    pub topic: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    pub division: Option<String>,
    pub image_url: Option<String>,
    pub short_description: Option<String>,
    pub paragraph: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}

/// Query parameters for blog listings.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct BlogListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Exact division match.
    pub division: Option<String>,
    /// Case-insensitive match on topic, short description or body.
    pub search: Option<String>,
    /// Earliest post date, inclusive.
    #[param(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    /// Latest post date, inclusive.
    #[param(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub topic: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub division: String,
    pub image_url: String,
    pub short_description: String,
    pub paragraph: String,
    pub slug: String,
    pub is_published: bool,
    pub view_count: i64,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogListResponse {
    pub data: Vec<BlogResponse>,
    pub pagination: Pagination,
}

impl From<blog::Model> for BlogResponse {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            topic: m.topic,
            date: m.date,
            division: m.division,
            image_url: m.image_url,
            short_description: m.short_description,
            paragraph: m.paragraph,
            slug: m.slug,
            is_published: m.is_published,
            view_count: m.view_count,
            display_order: m.display_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_body(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn validate_create_blog(req: &CreateBlogRequest) -> Result<(), AppError> {
    validate_title(&req.topic)?;
    validate_name(&req.division, "Division")?;
    validate_url(&req.image_url, "image_url")?;
    validate_body(&req.short_description, "short_description")?;
    validate_body(&req.paragraph, "paragraph")?;
    if let Some(ref slug) = req.slug {
        validate_slug(slug)?;
    }
    validate_optional_position(req.display_order)
}

pub fn validate_update_blog(req: &UpdateBlogRequest) -> Result<(), AppError> {
    if let Some(ref topic) = req.topic {
        validate_title(topic)?;
    }
    if let Some(ref division) = req.division {
        validate_name(division, "Division")?;
    }
    if let Some(ref url) = req.image_url {
        validate_url(url, "image_url")?;
    }
    if let Some(ref text) = req.short_description {
        validate_body(text, "short_description")?;
    }
    if let Some(ref text) = req.paragraph {
        validate_body(text, "paragraph")?;
    }
    if let Some(ref slug) = req.slug {
        validate_slug(slug)?;
    }
    validate_optional_position(req.display_order)
}

pub fn validate_blog_query(query: &BlogListQuery) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date)
        && start > end
    {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }
    Ok(())
}
