use crate::database::DbError;
use crate::database::tables::job::{Job, JobType};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, queue_job_id, job_type, job_args, status, \
                           job_working_duration_second, result, failure_reason, user_id";

pub struct JobStore;

impl JobStore {
    /// Owner-scoped lookup by the broker-assigned identifier. A job owned by
    /// someone else is indistinguishable from a missing one. Routes that are
    /// type-scoped pass the expected type.
    pub async fn find_by_queue_id(
        executor: impl Executor<'_, Database = Postgres>,
        queue_job_id: Uuid,
        user_id: i32,
        job_type: Option<JobType>,
    ) -> Result<Option<Job>, DbError> {
        Ok(sqlx::query_as::<_, Job>(&format!(
            r"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE queue_job_id = $1
              AND user_id = $2
              AND ($3::job_type IS NULL OR job_type = $3)
            "
        ))
        .bind(queue_job_id)
        .bind(user_id)
        .bind(job_type)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        job_type: Option<JobType>,
    ) -> Result<Vec<Job>, DbError> {
        Ok(sqlx::query_as::<_, Job>(&format!(
            r"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE user_id = $1
              AND ($2::job_type IS NULL OR job_type = $2)
            ORDER BY id
            "
        ))
        .bind(user_id)
        .bind(job_type)
        .fetch_all(executor)
        .await?)
    }

    /// Unscoped lookup for the worker, which knows the job only through the
    /// broker message.
    pub async fn find_by_queue_id_unscoped(
        executor: impl Executor<'_, Database = Postgres>,
        queue_job_id: Uuid,
    ) -> Result<Option<Job>, DbError> {
        Ok(sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE queue_job_id = $1"
        ))
        .bind(queue_job_id)
        .fetch_optional(executor)
        .await?)
    }
}
