use std::collections::HashSet;
use std::marker::PhantomData;

use async_trait::async_trait;
use common::storage::URL_PREFIX;
use sea_orm::{DatabaseConnection, DbErr, EntityName, EntityTrait, IdenStatic, QuerySelect};
use serde_json::Value;
use tracing::debug;

use crate::entity::{
    about_us, blog, brand, division, gallery_item, home_content, news_item, product,
};

/// A content type whose records may hold asset URLs.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Table the references live in.
    fn label(&self) -> &'static str;

    /// Names of the scanned columns.
    fn columns(&self) -> Vec<&'static str>;

    /// Every non-null URL currently stored in the scanned columns, across all
    /// rows regardless of publication state.
    async fn referenced_urls(&self, db: &DatabaseConnection) -> Result<HashSet<String>, DbErr>;
}

/// Reference source reading a fixed set of nullable string columns of one
/// entity.
pub struct ColumnReferences<E: EntityTrait> {
    columns: Vec<E::Column>,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> ColumnReferences<E> {
    pub fn new(columns: impl IntoIterator<Item = E::Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: EntityTrait> ReferenceSource for ColumnReferences<E> {
    fn label(&self) -> &'static str {
        E::default().table_name()
    }

    fn columns(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.as_str()).collect()
    }

    async fn referenced_urls(&self, db: &DatabaseConnection) -> Result<HashSet<String>, DbErr> {
        let mut urls = HashSet::new();
        for &column in &self.columns {
            let values: Vec<Option<String>> = E::find()
                .select_only()
                .column(column)
                .into_tuple()
                .all(db)
                .await?;
            urls.extend(values.into_iter().flatten().filter(|url| !url.is_empty()));
        }
        Ok(urls)
    }
}

/// Reference source over JSON columns of one entity. Any string anywhere in
/// the document that starts with the asset URL prefix counts as a reference,
/// whatever key it sits under.
pub struct JsonReferences<E: EntityTrait> {
    columns: Vec<E::Column>,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> JsonReferences<E> {
    pub fn new(columns: impl IntoIterator<Item = E::Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: EntityTrait> ReferenceSource for JsonReferences<E> {
    fn label(&self) -> &'static str {
        E::default().table_name()
    }

    fn columns(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.as_str()).collect()
    }

    async fn referenced_urls(&self, db: &DatabaseConnection) -> Result<HashSet<String>, DbErr> {
        let mut urls = HashSet::new();
        for &column in &self.columns {
            let documents: Vec<Option<Value>> = E::find()
                .select_only()
                .column(column)
                .into_tuple()
                .all(db)
                .await?;
            for document in documents.iter().flatten() {
                collect_asset_strings(document, &mut urls);
            }
        }
        Ok(urls)
    }
}

fn collect_asset_strings(value: &Value, urls: &mut HashSet<String>) {
    match value {
        Value::String(s) if s.starts_with(URL_PREFIX) => {
            urls.insert(s.clone());
        }
        Value::Array(items) => items.iter().for_each(|v| collect_asset_strings(v, urls)),
        Value::Object(map) => map.values().for_each(|v| collect_asset_strings(v, urls)),
        _ => {}
    }
}

/// Every content column that can hold an asset URL.
///
/// This list is the only thing keeping referenced assets from being swept: a
/// content type or column missing here has its assets reported as unused.
pub fn registry() -> Vec<Box<dyn ReferenceSource>> {
    vec![
        Box::new(ColumnReferences::<gallery_item::Entity>::new([
            gallery_item::Column::ImageUrl,
        ])),
        Box::new(ColumnReferences::<about_us::Entity>::new([
            about_us::Column::OwnerImageUrl,
        ])),
        Box::new(JsonReferences::<about_us::Entity>::new([
            about_us::Column::ManagementTeam,
            about_us::Column::Milestones,
        ])),
        Box::new(ColumnReferences::<product::Entity>::new([
            product::Column::ImageUrl1,
            product::Column::ImageUrl2,
            product::Column::ImageUrl3,
            product::Column::ImageUrl4,
            product::Column::ImageUrl5,
        ])),
        Box::new(ColumnReferences::<brand::Entity>::new([
            brand::Column::ImageUrl,
        ])),
        Box::new(ColumnReferences::<news_item::Entity>::new([
            news_item::Column::ImageUrl,
            news_item::Column::ThumbnailUrl,
        ])),
        Box::new(ColumnReferences::<blog::Entity>::new([
            blog::Column::ImageUrl,
        ])),
        Box::new(JsonReferences::<division::Entity>::new([
            division::Column::BasicInfo,
            division::Column::SubDivisions,
            division::Column::ContactUs,
        ])),
        Box::new(JsonReferences::<home_content::Entity>::new([
            home_content::Column::OurBrands,
            home_content::Column::OurCustomers,
            home_content::Column::OurPlatforms,
            home_content::Column::Recommendations,
        ])),
    ]
}

/// Union of the URLs referenced by all `sources`.
pub async fn collect_referenced_urls(
    sources: &[Box<dyn ReferenceSource>],
    db: &DatabaseConnection,
) -> Result<HashSet<String>, DbErr> {
    let mut referenced = HashSet::new();
    for source in sources {
        let urls = source.referenced_urls(db).await?;
        debug!(source = source.label(), count = urls.len(), "collected asset references");
        referenced.extend(urls);
    }
    Ok(referenced)
}
