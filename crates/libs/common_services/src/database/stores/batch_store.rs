use crate::database::DbError;
use crate::database::tables::upload_batch::UploadBatch;
use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub struct BatchStore;

impl BatchStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        batch_idno: Uuid,
        upload_time: DateTime<Utc>,
    ) -> Result<UploadBatch, DbError> {
        Ok(sqlx::query_as::<_, UploadBatch>(
            r"
            INSERT INTO upload_batches (batch_idno, upload_time)
            VALUES ($1, $2)
            RETURNING id, batch_idno, upload_time
            ",
        )
        .bind(batch_idno)
        .bind(upload_time)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_idno(
        executor: impl Executor<'_, Database = Postgres>,
        batch_idno: Uuid,
    ) -> Result<Option<UploadBatch>, DbError> {
        Ok(sqlx::query_as::<_, UploadBatch>(
            "SELECT id, batch_idno, upload_time FROM upload_batches WHERE batch_idno = $1",
        )
        .bind(batch_idno)
        .fetch_optional(executor)
        .await?)
    }
}
