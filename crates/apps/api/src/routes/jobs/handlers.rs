//! HTTP handlers for job submission and polling.

use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::jobs::error::JobsError;
use common_services::api::jobs::interfaces::JobRead;
use common_services::api::jobs::service::{
    create_fcs_info_job, create_files_stat_job, get_user_job, list_user_jobs,
};
use common_services::database::tables::job::JobType;
use common_services::database::tables::user::User;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CreateFcsInfoJobParams {
    /// Identifier of the file to inspect; must belong to the caller.
    pub file_idno: Uuid,
}

/// Submits a FILES_STAT job over the caller's files.
#[utoipa::path(
    post,
    path = "/me/files/stat-jobs/create",
    tag = "Jobs",
    responses(
        (status = 201, description = "Queue job identifier", body = Uuid),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn create_stat_job(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<(StatusCode, Json<Uuid>), JobsError> {
    let queue_job_id = create_files_stat_job(&context.pool, &user).await?;
    Ok((StatusCode::CREATED, Json(queue_job_id)))
}

/// Lists the caller's FILES_STAT jobs.
#[utoipa::path(
    get,
    path = "/me/files/stat-jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Jobs", body = [JobRead]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_stat_jobs(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<JobRead>>, JobsError> {
    let jobs = list_user_jobs(&context.pool, &user, JobType::FilesStat).await?;
    Ok(Json(jobs))
}

/// Polls one FILES_STAT job by its queue identifier.
#[utoipa::path(
    get,
    path = "/me/files/stat-jobs/{job_id}",
    tag = "Jobs",
    params(("job_id" = Uuid, Path, description = "Queue job identifier")),
    responses(
        (status = 200, description = "Job record", body = JobRead),
        (status = 404, description = "Job not found or not owned"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn get_stat_job(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRead>, JobsError> {
    let job = get_user_job(&context.pool, &user, job_id, JobType::FilesStat).await?;
    Ok(Json(job))
}

/// Submits an FCS_INFO job for one of the caller's files.
#[utoipa::path(
    post,
    path = "/fcs-files/fcs-info-jobs/create",
    tag = "Jobs",
    params(CreateFcsInfoJobParams),
    responses(
        (status = 201, description = "Queue job identifier", body = Uuid),
        (status = 400, description = "File not found or not owned"),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn create_info_job(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(params): Query<CreateFcsInfoJobParams>,
) -> Result<(StatusCode, Json<Uuid>), JobsError> {
    let queue_job_id = create_fcs_info_job(&context.pool, &user, params.file_idno).await?;
    Ok((StatusCode::CREATED, Json(queue_job_id)))
}

/// Lists the caller's FCS_INFO jobs.
#[utoipa::path(
    get,
    path = "/fcs-files/fcs-info-jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Jobs", body = [JobRead]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_info_jobs(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<JobRead>>, JobsError> {
    let jobs = list_user_jobs(&context.pool, &user, JobType::FcsInfo).await?;
    Ok(Json(jobs))
}

/// Polls one FCS_INFO job by its queue identifier.
#[utoipa::path(
    get,
    path = "/fcs-files/fcs-info-jobs/{job_id}",
    tag = "Jobs",
    params(("job_id" = Uuid, Path, description = "Queue job identifier")),
    responses(
        (status = 200, description = "Job record", body = JobRead),
        (status = 404, description = "Job not found or not owned"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn get_info_job(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRead>, JobsError> {
    let job = get_user_job(&context.pool, &user, job_id, JobType::FcsInfo).await?;
    Ok(Json(job))
}
