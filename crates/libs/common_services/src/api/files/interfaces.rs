use crate::database::tables::fcs_file::FcsFileSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One file pulled out of the multipart body, before validation.
#[derive(Debug)]
pub struct UploadInput {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Per-file settings supplied by authenticated uploaders, keyed by filename.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadFileSetting {
    pub filename: String,
    pub public: bool,
}

/// A file whose storage put failed; the rest of the batch is unaffected.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailedFile {
    pub filename: String,
    pub error: String,
}

/// The materialized batch returned by the upload endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadBatchResult {
    pub batch_idno: Uuid,
    pub upload_time: DateTime<Utc>,
    pub files: Vec<FcsFileSummary>,
    pub failed_files: Vec<FailedFile>,
}
