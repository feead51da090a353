use crate::api_state::ApiContext;
use crate::files::handlers::{generate_download_url, get_file, get_my_files, upload_fcs_files};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

/// Generous request cap; the per-file 1000 MiB limit is enforced by the
/// pipeline itself so the offending filename shows up in the error.
const UPLOAD_BODY_LIMIT: usize = 4 * 1024 * 1024 * 1024;

pub fn files_auth_optional_router() -> Router<ApiContext> {
    Router::new()
        .route("/files/upload", post(upload_fcs_files))
        .route("/files/{file_idno}", get(get_file))
        .route(
            "/files/{file_idno}/generate-download-url",
            get(generate_download_url),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

pub fn files_protected_router() -> Router<ApiContext> {
    Router::new().route("/files/mine", get(get_my_files))
}
