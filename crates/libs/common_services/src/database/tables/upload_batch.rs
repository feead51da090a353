use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UploadBatch {
    pub id: i64,
    /// Externally visible, time-sortable batch identifier (UUIDv7).
    pub batch_idno: Uuid,
    /// Second precision, UTC.
    pub upload_time: DateTime<Utc>,
}
