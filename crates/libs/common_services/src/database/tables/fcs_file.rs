use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct FcsFile {
    pub id: i64,
    /// Externally visible, time-sortable file identifier (UUIDv7).
    pub file_idno: Uuid,
    pub file_name: String,
    pub file_size_byte: i64,
    /// `{batch_idno}/{file_name}`; NULL when the upload failed.
    pub s3_key: Option<String>,
    pub public: bool,
    /// NULL for anonymous uploads, which are always public.
    pub user_id: Option<i32>,
    pub upload_batch_id: i64,
}

/// File read model served by the API; joins the owning batch's upload time.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct FcsFileSummary {
    pub file_idno: Uuid,
    pub file_name: String,
    pub file_size_byte: i64,
    pub s3_key: Option<String>,
    pub public: bool,
    pub upload_time: DateTime<Utc>,
}

/// Everything the FCS_INFO job needs about one owned file.
#[derive(Debug, Clone, FromRow)]
pub struct OwnedFileDetail {
    pub file_name: String,
    pub file_size_byte: i64,
    pub s3_key: Option<String>,
    pub upload_time: DateTime<Utc>,
}
