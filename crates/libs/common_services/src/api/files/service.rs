use crate::api::files::error::FilesError;
use crate::api::files::interfaces::{FailedFile, UploadBatchResult, UploadFileSetting, UploadInput};
use crate::api::files::validate::validate_upload;
use crate::database::stores::batch_store::BatchStore;
use crate::database::stores::file_store::{FileStore, NewFcsFile};
use crate::database::tables::fcs_file::FcsFileSummary;
use crate::database::tables::user::User;
use crate::storage::StorageGateway;
use chrono::{SubsecRound, Utc};
use futures_util::future::join_all;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

/// Runs the upload pipeline for one request: validate every file, push all of
/// them to object storage concurrently, then persist the batch and the
/// successfully stored files in a single commit.
///
/// Mixed outcomes are not an error: failed puts end up in `failed_files`
/// while the rest of the batch lands normally. A batch where every put failed
/// still persists, with an empty file list.
///
/// # Errors
///
/// Validation failures ([`FilesError::NotAnFcsFile`],
/// [`FilesError::FileTooLarge`], [`FilesError::InvalidFilename`],
/// [`FilesError::MissingFileSetting`]) abort the whole request before any
/// storage write; database errors abort it afterwards.
pub async fn upload_fcs_files(
    pool: &PgPool,
    storage: &StorageGateway,
    uploads: Vec<UploadInput>,
    settings: Option<Vec<UploadFileSetting>>,
    user: Option<&User>,
) -> Result<UploadBatchResult, FilesError> {
    for upload in &uploads {
        validate_upload(&upload.file_name, upload.data.len())?;
    }

    // Authenticated callers must provide a settings entry per file before any
    // upload begins; anonymous uploads are ownerless and always public.
    let public_flags: HashMap<String, bool> = match user {
        Some(_) => {
            let entries = settings.unwrap_or_default();
            let by_name: HashMap<String, bool> = entries
                .into_iter()
                .map(|s| (s.filename, s.public))
                .collect();
            for upload in &uploads {
                if !by_name.contains_key(&upload.file_name) {
                    return Err(FilesError::MissingFileSetting(upload.file_name.clone()));
                }
            }
            by_name
        }
        None => HashMap::new(),
    };

    let batch_idno = Uuid::now_v7();
    let upload_time = Utc::now().trunc_subsecs(0);

    // Fan out one put per file; the request suspends until every transfer is
    // done, so the response never races an outstanding upload.
    let puts = uploads.into_iter().map(|upload| {
        let UploadInput { file_name, data } = upload;
        let s3_key = format!("{batch_idno}/{file_name}");
        let size_byte = data.len() as i64;
        async move {
            let outcome = storage.put_object(&s3_key, data).await;
            (file_name, size_byte, s3_key, outcome)
        }
    });
    let outcomes = join_all(puts).await;

    let mut tx = pool.begin().await?;
    let batch = BatchStore::create(&mut *tx, batch_idno, upload_time).await?;

    let mut files: Vec<FcsFileSummary> = Vec::new();
    let mut failed_files: Vec<FailedFile> = Vec::new();
    for (file_name, size_byte, s3_key, outcome) in outcomes {
        match outcome {
            Ok(()) => {
                let public = match user {
                    Some(_) => public_flags.get(&file_name).copied().unwrap_or(true),
                    None => true,
                };
                let stored = FileStore::create(
                    &mut *tx,
                    NewFcsFile {
                        file_idno: Uuid::now_v7(),
                        file_name: &file_name,
                        file_size_byte: size_byte,
                        s3_key: Some(&s3_key),
                        public,
                        user_id: user.map(|u| u.id),
                        upload_batch_id: batch.id,
                    },
                )
                .await?;
                files.push(FcsFileSummary {
                    file_idno: stored.file_idno,
                    file_name: stored.file_name,
                    file_size_byte: stored.file_size_byte,
                    s3_key: stored.s3_key,
                    public: stored.public,
                    upload_time: batch.upload_time,
                });
            }
            Err(storage_err) => {
                warn!("Upload of '{}' failed: {}", file_name, storage_err);
                failed_files.push(FailedFile {
                    filename: file_name,
                    error: storage_err.to_string(),
                });
            }
        }
    }
    tx.commit().await?;

    info!(
        "Stored batch {} ({} ok, {} failed)",
        batch.batch_idno,
        files.len(),
        failed_files.len()
    );

    Ok(UploadBatchResult {
        batch_idno: batch.batch_idno,
        upload_time: batch.upload_time,
        files,
        failed_files,
    })
}

/// Builds a presigned download URL for one visible file.
///
/// The visibility check happened already; a file without a storage key (its
/// upload failed) is reported as not found.
pub async fn generate_download_url(
    storage: &StorageGateway,
    file: &FcsFileSummary,
) -> Result<String, FilesError> {
    let Some(s3_key) = file.s3_key.as_deref() else {
        return Err(FilesError::FileNotFound);
    };
    storage
        .generate_download_url(s3_key, None)
        .await
        .map_err(|e| FilesError::Internal(color_eyre::eyre::eyre!(e)))
}
