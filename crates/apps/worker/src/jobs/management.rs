//! Queue message claiming and job record lifecycle transitions.
//!
//! Every transition commits in its own transaction; no lock is held across
//! domain work. Finalization is last-writer-wins, which is the tolerated
//! outcome when the broker redelivers a message that was already executed.

use crate::context::WorkerContext;
use color_eyre::Result;
use common_services::database::stores::job_store::JobStore;
use common_services::database::tables::job::Job;
use common_services::database::tables::queue_message::QueueMessage;
use sqlx::PgPool;
use uuid::Uuid;

/// Atomically claims the next available queue message.
///
/// Takes either a queued message or a delivered one whose visibility timeout
/// lapsed — the broker's at-least-once redelivery. The claim marks the
/// message delivered and counts the delivery.
///
/// # Errors
///
/// Returns an error if the database transaction fails.
pub async fn claim_next_message(context: &WorkerContext) -> Result<Option<QueueMessage>> {
    let mut tx = context.pool.begin().await?;

    let message = sqlx::query_as::<_, QueueMessage>(
        r"
        WITH candidate AS (
            SELECT id FROM queue_messages
            WHERE status = 'queued'
               OR (status = 'delivered' AND delivered_at < now() - interval '1 second' * $1)
            ORDER BY created_at
            FOR UPDATE SKIP LOCKED
            LIMIT 1
        )
        UPDATE queue_messages
        SET status = 'delivered',
            delivered_at = now(),
            deliveries = deliveries + 1
        WHERE id = (SELECT id FROM candidate)
        RETURNING id, queue_job_id, job_type, payload, deliveries
        ",
    )
    .bind(context.settings.worker.visibility_timeout_seconds)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(message)
}

/// Removes a fully processed message from the broker.
pub async fn ack_message(pool: &PgPool, message_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM queue_messages WHERE id = $1")
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolves the job record a broker message belongs to.
pub async fn find_job_by_queue_id(pool: &PgPool, queue_job_id: Uuid) -> Result<Option<Job>> {
    Ok(JobStore::find_by_queue_id_unscoped(pool, queue_job_id).await?)
}

/// Transitions a job to running in its own committed transaction, before any
/// domain work starts. Pollers see RUNNING as soon as execution truly begins.
/// Terminal rows are left untouched so a redelivered message cannot regress
/// a finished job.
pub async fn mark_job_running(pool: &PgPool, job_id: i64) -> Result<()> {
    sqlx::query(
        "UPDATE jobs SET status = 'running' WHERE id = $1 AND status IN ('pending', 'running')",
    )
    .bind(job_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Finalizes a successful job: result payload, FINISHED status and the
/// working duration land in one commit.
pub async fn finalize_job_success(
    pool: &PgPool,
    job_id: i64,
    result: &serde_json::Value,
    working_duration_second: f64,
) -> Result<()> {
    sqlx::query(
        r"
        UPDATE jobs
        SET status = 'finished',
            result = $2,
            job_working_duration_second = $3,
            failure_reason = NULL
        WHERE id = $1
        ",
    )
    .bind(job_id)
    .bind(result)
    .bind(working_duration_second)
    .execute(pool)
    .await?;
    Ok(())
}

/// Finalizes a failed job with a reason instead of leaving the record stuck
/// in RUNNING.
pub async fn finalize_job_failure(
    pool: &PgPool,
    job_id: i64,
    failure_reason: &str,
    working_duration_second: f64,
) -> Result<()> {
    sqlx::query(
        r"
        UPDATE jobs
        SET status = 'failed',
            failure_reason = $2,
            job_working_duration_second = $3
        WHERE id = $1
        ",
    )
    .bind(job_id)
    .bind(failure_reason)
    .bind(working_duration_second)
    .execute(pool)
    .await?;
    Ok(())
}

/// Fails the job attached to a message that exceeded the delivery bound.
pub async fn fail_job_for_exhausted_message(
    pool: &PgPool,
    queue_job_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r"
        UPDATE jobs
        SET status = 'failed', failure_reason = 'max delivery attempts exceeded'
        WHERE queue_job_id = $1 AND status IN ('pending', 'running')
        ",
    )
    .bind(queue_job_id)
    .execute(pool)
    .await?;
    Ok(())
}
