use crate::context::WorkerContext;
use crate::handlers::handle_job;
use crate::jobs::management::{
    ack_message, claim_next_message, fail_job_for_exhausted_message, finalize_job_failure,
    finalize_job_success, find_job_by_queue_id, mark_job_running,
};
use app_state::AppSettings;
use color_eyre::Result;
use common_services::database::tables::queue_message::QueueMessage;
use common_services::utils::nice_id;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, info, warn};

pub async fn create_worker(pool: PgPool, settings: AppSettings, stop_on_sleep: bool) -> Result<()> {
    let worker_id = nice_id(8);
    info!("🛠️ [Worker ID: {}] Starting.", worker_id);
    let context = WorkerContext::new(pool, settings, worker_id);

    run_worker_loop(&context, stop_on_sleep).await
}

/// The main loop for the worker process, continuously claiming and processing
/// queue messages, one at a time per worker instance.
///
/// # Errors
///
/// Returns an error if there is a problem communicating with the database
/// when claiming or finalizing a job. The loop terminates in such a case.
pub async fn run_worker_loop(context: &WorkerContext, stop_on_sleep: bool) -> Result<()> {
    let mut sleeping = false;

    loop {
        let maybe_message = claim_next_message(context).await?;

        if let Some(message) = maybe_message {
            sleeping = false;
            process_message(context, &message).await?;
        } else {
            if !sleeping {
                sleeping = true;
                info!("💤 No jobs, going to sleep...");
                if stop_on_sleep {
                    return Ok(());
                }
            }
            sleep(Duration::from_millis(context.settings.worker.poll_interval_ms)).await;
        }
    }
}

/// Runs one claimed message through the job record lifecycle.
///
/// The broker message carries only the domain arguments; the job record is
/// resolved by its queue identifier. No matching record means there is
/// nothing to update — the message is dropped without side effects.
async fn process_message(context: &WorkerContext, message: &QueueMessage) -> Result<()> {
    // The duration clock starts before the RUNNING transition.
    let started = Instant::now();

    if message.deliveries > context.settings.worker.max_deliveries {
        warn!(
            "Message {} exceeded {} deliveries, failing its job.",
            message.queue_job_id, context.settings.worker.max_deliveries
        );
        fail_job_for_exhausted_message(&context.pool, message.queue_job_id).await?;
        ack_message(&context.pool, message.id).await?;
        return Ok(());
    }

    let Some(job) = find_job_by_queue_id(&context.pool, message.queue_job_id).await? else {
        error!("Job {} not found in DB", message.queue_job_id);
        ack_message(&context.pool, message.id).await?;
        return Ok(());
    };

    info!("🐜 {:?} Job {} is running", job.job_type, message.queue_job_id);
    mark_job_running(&context.pool, job.id).await?;

    match handle_job(context, message).await {
        Ok(result) => {
            finalize_job_success(
                &context.pool,
                job.id,
                &result,
                started.elapsed().as_secs_f64(),
            )
            .await?;
            info!("Job {} is finished", message.queue_job_id);
        }
        Err(report) => {
            error!("Job {} failed: {report:?}", message.queue_job_id);
            finalize_job_failure(
                &context.pool,
                job.id,
                &format!("{report}"),
                started.elapsed().as_secs_f64(),
            )
            .await?;
        }
    }

    ack_message(&context.pool, message.id).await?;
    Ok(())
}
