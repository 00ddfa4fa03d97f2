use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A business division page. Identified by an editor-chosen ID such as
/// `IND_DISPLAY_001`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "division")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    /// `active` or `inactive`; only active divisions are public.
    pub status: String,
    pub display_order: i32,

    /// Descriptions and banner image.
    pub basic_info: Option<Json>,
    /// Sub-division sections with partner logos and staff photos.
    pub sub_divisions: Option<Json>,
    pub contact_us: Option<Json>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
