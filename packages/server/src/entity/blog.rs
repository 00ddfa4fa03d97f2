use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub topic: String,
    /// Publication date shown on the post; listings sort by it.
    pub date: Date,
    /// Business division the post belongs to, e.g. `Solar`.
    pub division: String,
    pub image_url: String,

    #[sea_orm(column_type = "Text")]
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub paragraph: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub is_published: bool,
    pub view_count: i64,
    pub display_order: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
