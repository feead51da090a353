use crate::api::jobs::error::JobsError;
use crate::api::jobs::interfaces::JobRead;
use crate::database::stores::file_store::FileStore;
use crate::database::stores::job_store::JobStore;
use crate::database::tables::job::JobType;
use crate::database::tables::user::User;
use crate::job_queue::{FcsInfoArgs, FilesStatArgs, submit_job};
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Creates a FILES_STAT job for the user and enqueues it.
pub async fn create_files_stat_job(pool: &PgPool, user: &User) -> Result<Uuid, JobsError> {
    let args = FilesStatArgs { user_id: user.id };
    let queue_job_id = submit_job(pool, JobType::FilesStat, &args, user.id).await?;
    info!(
        "User {} created a files stat job, queue job ID: {}",
        user.username, queue_job_id
    );
    Ok(queue_job_id)
}

/// Creates an FCS_INFO job for one of the user's files and enqueues it.
///
/// # Errors
///
/// * [`JobsError::FileNotFound`] when the file does not exist or belongs to
///   someone else.
pub async fn create_fcs_info_job(
    pool: &PgPool,
    user: &User,
    file_idno: Uuid,
) -> Result<Uuid, JobsError> {
    let file = FileStore::find_owned(pool, file_idno, user.id).await?;
    if file.is_none() {
        return Err(JobsError::FileNotFound(file_idno));
    }

    let args = FcsInfoArgs {
        user_id: user.id,
        file_idno,
    };
    let queue_job_id = submit_job(pool, JobType::FcsInfo, &args, user.id).await?;
    info!(
        "User {} created a FCS info job, queue job ID: {}",
        user.username, queue_job_id
    );
    Ok(queue_job_id)
}

/// Looks up one of the user's jobs by queue identifier, scoped to a job type.
///
/// # Errors
///
/// * [`JobsError::JobNotFound`] when there is no match — including when the
///   job exists but belongs to someone else.
pub async fn get_user_job(
    pool: &PgPool,
    user: &User,
    queue_job_id: Uuid,
    job_type: JobType,
) -> Result<JobRead, JobsError> {
    let job = JobStore::find_by_queue_id(pool, queue_job_id, user.id, Some(job_type))
        .await?
        .ok_or(JobsError::JobNotFound)?;
    JobRead::try_from(job).map_err(|e| JobsError::Internal(eyre!(e)))
}

/// Lists the user's jobs of one type.
pub async fn list_user_jobs(
    pool: &PgPool,
    user: &User,
    job_type: JobType,
) -> Result<Vec<JobRead>, JobsError> {
    let jobs = JobStore::list_for_user(pool, user.id, Some(job_type)).await?;
    jobs.into_iter()
        .map(|job| JobRead::try_from(job).map_err(|e| JobsError::Internal(eyre!(e))))
        .collect()
}
