use crate::api_state::ApiContext;
use crate::jobs::handlers::{
    create_info_job, create_stat_job, get_info_job, get_info_jobs, get_stat_job, get_stat_jobs,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn jobs_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/me/files/stat-jobs/create", post(create_stat_job))
        .route("/me/files/stat-jobs", get(get_stat_jobs))
        .route("/me/files/stat-jobs/{job_id}", get(get_stat_job))
        .route("/fcs-files/fcs-info-jobs/create", post(create_info_job))
        .route("/fcs-files/fcs-info-jobs", get(get_info_jobs))
        .route("/fcs-files/fcs-info-jobs/{job_id}", get(get_info_job))
}
