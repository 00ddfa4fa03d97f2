use std::sync::Arc;

use common::storage::AssetStore;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::ReconcileError;
use super::diff::find_unused;
use super::sources::{ReferenceSource, collect_referenced_urls};

/// A single asset the sweep could not remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct SweepFailure {
    #[schema(example = "/uploads/3f0c6a6e-7d1f-4f7e-9a56-0d1c1a1e2b3c.jpg")]
    pub url: String,
    #[schema(example = "storage IO error: permission denied")]
    pub reason: String,
}

/// Outcome of one delete sweep. Every targeted URL lands in exactly one of
/// `deleted`, `missing` or `failed`.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Unused at the time of the sweep, sorted.
    pub targeted: Vec<String>,
    /// Removed by this sweep.
    pub deleted: Vec<String>,
    /// Already gone when the sweep reached them.
    pub missing: Vec<String>,
    pub failed: Vec<SweepFailure>,
}

/// Finds and removes assets that no content record references.
pub struct AssetReconciler {
    db: DatabaseConnection,
    store: Arc<dyn AssetStore>,
    sources: Vec<Box<dyn ReferenceSource>>,
    sweep_lock: Mutex<()>,
}

impl AssetReconciler {
    pub fn new(
        db: DatabaseConnection,
        store: Arc<dyn AssetStore>,
        sources: Vec<Box<dyn ReferenceSource>>,
    ) -> Self {
        Self {
            db,
            store,
            sources,
            sweep_lock: Mutex::new(()),
        }
    }

    /// URLs of stored assets that nothing references, sorted ascending.
    ///
    /// Read-only; safe to call at any time.
    pub async fn find_unused_assets(&self) -> Result<Vec<String>, ReconcileError> {
        let referenced = collect_referenced_urls(&self.sources, &self.db).await?;
        let stored = self.store.list_stored_urls().await?;

        let mut unused: Vec<String> = find_unused(&stored, &referenced).into_iter().collect();
        unused.sort();
        Ok(unused)
    }

    /// Delete every currently unused asset.
    ///
    /// The unused set is recomputed here, never taken from an earlier
    /// `find_unused_assets` call. A failed delete is recorded and the sweep
    /// moves on. Concurrent sweeps queue behind each other.
    pub async fn delete_unused_assets(&self) -> Result<SweepReport, ReconcileError> {
        let _guard = self.sweep_lock.lock().await;

        let targeted = self.find_unused_assets().await?;
        let mut report = SweepReport {
            targeted: targeted.clone(),
            ..Default::default()
        };

        for url in targeted {
            match self.store.delete(&url).await {
                Ok(true) => report.deleted.push(url),
                Ok(false) => report.missing.push(url),
                Err(e) => {
                    warn!(url = %url, error = %e, "failed to delete unused asset");
                    report.failed.push(SweepFailure {
                        url,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            targeted = report.targeted.len(),
            deleted = report.deleted.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            "unused asset sweep finished"
        );
        Ok(report)
    }
}
