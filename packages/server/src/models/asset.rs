use serde::Serialize;

use crate::reconcile::{SweepFailure, SweepReport};

/// Result of a successful upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Generated file name on disk.
    #[schema(example = "3f0c6a6e-7d1f-4f7e-9a56-0d1c1a1e2b3c.jpg")]
    pub file_name: String,
    /// Public URL to store in content records.
    #[schema(example = "/uploads/3f0c6a6e-7d1f-4f7e-9a56-0d1c1a1e2b3c.jpg")]
    pub file_url: String,
    /// Declared content type, or one guessed from the original file name.
    #[schema(example = "image/jpeg")]
    pub file_type: String,
    /// Size in bytes.
    #[schema(example = 48213)]
    pub file_size: u64,
    #[schema(example = "File uploaded successfully")]
    pub message: String,
}

/// Assets not referenced by any content record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UnusedFilesResponse {
    /// Asset URLs, sorted.
    pub unused_files: Vec<String>,
    #[schema(example = 2)]
    pub count: usize,
    #[schema(example = "Found 2 unused files")]
    pub message: String,
}

/// Outcome of a cleanup sweep.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteUnusedResponse {
    /// Asset URLs the sweep targeted, sorted.
    pub unused_files: Vec<String>,
    /// Number of targeted assets.
    #[schema(example = 2)]
    pub count: usize,
    /// Assets actually removed.
    #[schema(example = 2)]
    pub deleted_count: usize,
    /// Assets already gone when the sweep reached them.
    #[schema(example = 0)]
    pub missing_count: usize,
    /// Assets that could not be removed.
    pub failed: Vec<SweepFailure>,
    #[schema(example = "Deleted 2 of 2 unused files")]
    pub message: String,
}

impl From<Vec<String>> for UnusedFilesResponse {
    fn from(unused_files: Vec<String>) -> Self {
        let count = unused_files.len();
        Self {
            unused_files,
            count,
            message: format!("Found {count} unused files"),
        }
    }
}

impl From<SweepReport> for DeleteUnusedResponse {
    fn from(report: SweepReport) -> Self {
        let count = report.targeted.len();
        let deleted_count = report.deleted.len();
        let message = if report.failed.is_empty() {
            format!("Deleted {deleted_count} of {count} unused files")
        } else {
            format!(
                "Deleted {deleted_count} of {count} unused files; {} failed",
                report.failed.len()
            )
        };
        Self {
            unused_files: report.targeted,
            count,
            deleted_count,
            missing_count: report.missing.len(),
            failed: report.failed,
            message,
        }
    }
}
