use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company profile. The site uses a single row; the first one wins.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about_us")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub company_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub company_description: Option<String>,

    pub owner_name: Option<String>,
    pub owner_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub owner_description: Option<String>,
    pub owner_image_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub introduction: Option<String>,

    /// Free-form list of team members.
    pub management_team: Option<Json>,
    /// Free-form list of company milestones.
    pub milestones: Option<Json>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
