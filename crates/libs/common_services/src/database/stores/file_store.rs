use crate::database::DbError;
use crate::database::tables::fcs_file::{FcsFile, FcsFileSummary, OwnedFileDetail};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub struct NewFcsFile<'a> {
    pub file_idno: Uuid,
    pub file_name: &'a str,
    pub file_size_byte: i64,
    pub s3_key: Option<&'a str>,
    pub public: bool,
    pub user_id: Option<i32>,
    pub upload_batch_id: i64,
}

pub struct FileStore;

impl FileStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        file: NewFcsFile<'_>,
    ) -> Result<FcsFile, DbError> {
        Ok(sqlx::query_as::<_, FcsFile>(
            r"
            INSERT INTO fcs_files (file_idno, file_name, file_size_byte, s3_key, public, user_id, upload_batch_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, file_idno, file_name, file_size_byte, s3_key, public, user_id, upload_batch_id
            ",
        )
        .bind(file.file_idno)
        .bind(file.file_name)
        .bind(file.file_size_byte)
        .bind(file.s3_key)
        .bind(file.public)
        .bind(file.user_id)
        .bind(file.upload_batch_id)
        .fetch_one(executor)
        .await?)
    }

    /// All files owned by a user, newest batch first, input order within a
    /// batch preserved through the insertion ids.
    pub async fn list_summaries_by_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<FcsFileSummary>, DbError> {
        Ok(sqlx::query_as::<_, FcsFileSummary>(
            r"
            SELECT f.file_idno, f.file_name, f.file_size_byte, f.s3_key, f.public, b.upload_time
            FROM fcs_files f
            JOIN upload_batches b ON b.id = f.upload_batch_id
            WHERE f.user_id = $1
            ORDER BY f.id
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Visibility-aware single-file lookup: a public file is visible to
    /// everyone, a private one only to its owner. A private file viewed by
    /// anyone else is indistinguishable from a missing one.
    pub async fn find_visible_summary(
        executor: impl Executor<'_, Database = Postgres>,
        file_idno: Uuid,
        viewer_user_id: Option<i32>,
    ) -> Result<Option<FcsFileSummary>, DbError> {
        Ok(sqlx::query_as::<_, FcsFileSummary>(
            r"
            SELECT f.file_idno, f.file_name, f.file_size_byte, f.s3_key, f.public, b.upload_time
            FROM fcs_files f
            JOIN upload_batches b ON b.id = f.upload_batch_id
            WHERE f.file_idno = $1 AND (f.public OR f.user_id = $2)
            ",
        )
        .bind(file_idno)
        .bind(viewer_user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Ownership-scoped lookup used when creating and executing FCS_INFO
    /// jobs; a file that exists but belongs to someone else is not found.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        file_idno: Uuid,
        user_id: i32,
    ) -> Result<Option<FcsFile>, DbError> {
        Ok(sqlx::query_as::<_, FcsFile>(
            r"
            SELECT id, file_idno, file_name, file_size_byte, s3_key, public, user_id, upload_batch_id
            FROM fcs_files
            WHERE file_idno = $1 AND user_id = $2
            ",
        )
        .bind(file_idno)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_owned_detail(
        executor: impl Executor<'_, Database = Postgres>,
        file_idno: Uuid,
        user_id: i32,
    ) -> Result<Option<OwnedFileDetail>, DbError> {
        Ok(sqlx::query_as::<_, OwnedFileDetail>(
            r"
            SELECT f.file_name, f.file_size_byte, f.s3_key, b.upload_time
            FROM fcs_files f
            JOIN upload_batches b ON b.id = f.upload_batch_id
            WHERE f.file_idno = $1 AND f.user_id = $2
            ",
        )
        .bind(file_idno)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Count and total size of a user's files. A user with no files yields
    /// `(0, 0)`; the sum is coalesced, never NULL.
    pub async fn stats_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<(i64, i64), DbError> {
        Ok(sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT COUNT(*), COALESCE(SUM(file_size_byte), 0)::BIGINT
            FROM fcs_files
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }
}
