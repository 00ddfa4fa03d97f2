use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub capacity: Option<String>,
    /// Price in minor currency units.
    pub price_cents: Option<i64>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub warranty: Option<String>,

    pub image_url_1: Option<String>,
    pub image_url_2: Option<String>,
    pub image_url_3: Option<String>,
    pub image_url_4: Option<String>,
    pub image_url_5: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
