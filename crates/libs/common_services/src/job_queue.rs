//! Submission side of the job queue.
//!
//! The broker is a Postgres-backed message table. Enqueuing writes the broker
//! message and the job record in one transaction: either both exist afterwards
//! or the job was never created. The broker assigns `queue_job_id` itself;
//! callers learn it only from a successful submit.

use crate::database::DbError;
use crate::database::tables::job::JobType;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// Arguments for a FILES_STAT job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct FilesStatArgs {
    pub user_id: i32,
}

/// Arguments for an FCS_INFO job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct FcsInfoArgs {
    pub user_id: i32,
    pub file_idno: Uuid,
}

/// Pushes a job onto the broker and persists the matching pending job record.
///
/// Returns the broker-assigned queue job identifier.
///
/// # Errors
///
/// Returns an error if argument serialization or the transaction fails; in
/// that case no message and no job record exist.
pub async fn submit_job<T: Serialize + Send + Sync>(
    pool: &PgPool,
    job_type: JobType,
    args: &T,
    user_id: i32,
) -> Result<Uuid, DbError> {
    let json_args = serde_json::to_value(args)?;

    let mut tx = pool.begin().await?;

    let queue_job_id: Uuid = sqlx::query_scalar(
        r"
        INSERT INTO queue_messages (job_type, payload)
        VALUES ($1, $2)
        RETURNING queue_job_id
        ",
    )
    .bind(job_type)
    .bind(&json_args)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r"
        INSERT INTO jobs (queue_job_id, job_type, job_args, status, user_id)
        VALUES ($1, $2, $3, 'pending', $4)
        ",
    )
    .bind(queue_job_id)
    .bind(job_type)
    .bind(&json_args)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Enqueued {:?} job {} for user {}",
        job_type, queue_job_id, user_id
    );
    Ok(queue_job_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fcs_info_args_round_trip() {
        let args = FcsInfoArgs {
            user_id: 7,
            file_idno: Uuid::now_v7(),
        };
        let value = serde_json::to_value(args).unwrap();
        assert_eq!(value["user_id"], json!(7));
        let back: FcsInfoArgs = serde_json::from_value(value).unwrap();
        assert_eq!(back.user_id, 7);
        assert_eq!(back.file_idno, args.file_idno);
    }

    #[test]
    fn job_type_uses_wire_casing() {
        assert_eq!(
            serde_json::to_value(JobType::FilesStat).unwrap(),
            json!("FILES_STAT")
        );
        assert_eq!(
            serde_json::to_value(JobType::FcsInfo).unwrap(),
            json!("FCS_INFO")
        );
    }
}
