use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JobsError {
    /// Covers both "does not exist" and "not yours": the two are deliberately
    /// indistinguishable.
    #[error("Job not found")]
    JobNotFound,

    #[error("File {0} not found")]
    FileNotFound(Uuid),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl IntoResponse for JobsError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::JobNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::FileNotFound(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(report) => {
                error!("Internal jobs error: {report:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected internal error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for JobsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
