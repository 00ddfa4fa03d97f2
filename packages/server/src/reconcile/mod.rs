//! Reconciliation between the asset store and the content records that
//! reference assets by URL.
//!
//! The two stores share no transaction. A sweep reads a snapshot of both and
//! deletes what was unreferenced at that instant; an asset referenced after
//! the scan but before its deletion is lost. Sweeps are serialized within the
//! process, nothing more.

mod diff;
mod service;
mod sources;

use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

pub use diff::find_unused;
pub use service::{AssetReconciler, SweepFailure, SweepReport};
pub use sources::{
    ColumnReferences, JsonReferences, ReferenceSource, collect_referenced_urls, registry,
};

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("reference scan failed: {0}")]
    Database(#[from] DbErr),

    #[error("asset enumeration failed: {0}")]
    Storage(#[from] StorageError),
}
