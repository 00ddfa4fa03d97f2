use std::sync::Arc;

use common::storage::AssetStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::reconcile::AssetReconciler;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub assets: Arc<dyn AssetStore>,
    pub reconciler: Arc<AssetReconciler>,
}
