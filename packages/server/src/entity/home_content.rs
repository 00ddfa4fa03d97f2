use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Home page blocks. Single row; the first one wins.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "home_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub welcome_message: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub short_paragraph: Option<String>,

    /// Logo strips: lists of `{name, image_url, link}`-like objects.
    pub our_brands: Option<Json>,
    pub our_customers: Option<Json>,
    pub our_platforms: Option<Json>,
    pub recommendations: Option<Json>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
