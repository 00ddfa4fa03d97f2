use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site contact details. Single row, like `about_us`.
///
/// The social `*_url` columns are outbound links, not assets.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
