//! HTTP handlers for file upload and retrieval.

use crate::api_state::ApiContext;
use crate::auth::middlewares::optional_user::OptionalUser;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::files::error::FilesError;
use common_services::api::files::interfaces::{UploadBatchResult, UploadFileSetting, UploadInput};
use common_services::api::files::service;
use common_services::database::stores::file_store::FileStore;
use common_services::database::tables::fcs_file::FcsFileSummary;
use common_services::database::tables::user::User;
use tracing::instrument;
use uuid::Uuid;

/// Uploads a batch of `.fcs` files.
///
/// Anonymous uploads are allowed and produce ownerless, always-public files.
/// Authenticated callers must send an `upload_file_settings` JSON array with
/// one `{filename, public}` entry per file.
#[utoipa::path(
    post,
    path = "/files/upload",
    tag = "Files",
    responses(
        (status = 201, description = "Batch stored; per-file failures are reported inline", body = UploadBatchResult),
        (status = 403, description = "A file is not a .fcs file or has an invalid filename"),
        (status = 413, description = "A file exceeds the 1000 MiB limit"),
        (status = 422, description = "Missing or invalid upload_file_settings for an authenticated upload"),
    )
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload_fcs_files(
    State(context): State<ApiContext>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadBatchResult>), FilesError> {
    let mut uploads: Vec<UploadInput> = Vec::new();
    let mut settings: Option<Vec<UploadFileSetting>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FilesError::Multipart(e.to_string()))?
    {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("upload_files") => {
                let file_name = field
                    .file_name()
                    .map(ToOwned::to_owned)
                    .ok_or_else(|| {
                        FilesError::Multipart("upload_files entry without a filename".to_string())
                    })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| FilesError::Multipart(e.to_string()))?;
                uploads.push(UploadInput {
                    file_name,
                    data: data.to_vec(),
                });
            }
            Some("upload_file_settings") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| FilesError::Multipart(e.to_string()))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| FilesError::InvalidFileSettings(e.to_string()))?;
                settings = Some(parsed);
            }
            _ => {}
        }
    }

    let result = service::upload_fcs_files(
        &context.pool,
        &context.storage,
        uploads,
        settings,
        user.as_ref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Lists the authenticated user's files.
#[utoipa::path(
    get,
    path = "/files/mine",
    tag = "Files",
    responses(
        (status = 200, description = "Owned files", body = [FcsFileSummary]),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_files(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<FcsFileSummary>>, FilesError> {
    let files = FileStore::list_summaries_by_user(&context.pool, user.id).await?;
    Ok(Json(files))
}

/// Fetches one file summary. A private file is visible only to its owner;
/// everyone else gets the same 404 a missing file would produce.
#[utoipa::path(
    get,
    path = "/files/{file_idno}",
    tag = "Files",
    params(("file_idno" = Uuid, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File summary", body = FcsFileSummary),
        (status = 404, description = "File not found or not visible"),
    )
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn get_file(
    State(context): State<ApiContext>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    Path(file_idno): Path<Uuid>,
) -> Result<Json<FcsFileSummary>, FilesError> {
    let file =
        FileStore::find_visible_summary(&context.pool, file_idno, user.as_ref().map(|u| u.id))
            .await?
            .ok_or(FilesError::FileNotFound)?;
    Ok(Json(file))
}

/// Generates a short-lived signed download URL for one visible file.
#[utoipa::path(
    get,
    path = "/files/{file_idno}/generate-download-url",
    tag = "Files",
    params(("file_idno" = Uuid, Path, description = "File identifier")),
    responses(
        (status = 201, description = "Signed URL, valid for the configured TTL (60 s by default)", body = String),
        (status = 404, description = "File not found or not visible"),
    )
)]
#[instrument(skip(context, user), err(Debug))]
pub async fn generate_download_url(
    State(context): State<ApiContext>,
    Extension(OptionalUser(user)): Extension<OptionalUser>,
    Path(file_idno): Path<Uuid>,
) -> Result<(StatusCode, Json<String>), FilesError> {
    let file =
        FileStore::find_visible_summary(&context.pool, file_idno, user.as_ref().map(|u| u.id))
            .await?
            .ok_or(FilesError::FileNotFound)?;
    let url = service::generate_download_url(&context.storage, &file).await?;
    Ok((StatusCode::CREATED, Json(url)))
}
