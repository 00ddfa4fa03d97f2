use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    pub category: String,
    pub display_order: i32,
    pub is_featured: bool,
    pub is_published: bool,
    /// Published items past this instant drop out of the public listing.
    pub expire_date: Option<DateTimeUtc>,
    pub author: Option<String>,
    pub view_count: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
