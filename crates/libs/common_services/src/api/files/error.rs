use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum FilesError {
    #[error("File '{0}' is not a .fcs file")]
    NotAnFcsFile(String),

    #[error("File '{0}' exceeds the 1000 MiB upload limit")]
    FileTooLarge(String),

    #[error("File '{0}' has an invalid filename")]
    InvalidFilename(String),

    #[error("No upload settings entry for file '{0}'")]
    MissingFileSetting(String),

    #[error("upload_file_settings is not a valid settings list: {0}")]
    InvalidFileSettings(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("File not found")]
    FileNotFound,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl IntoResponse for FilesError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotAnFcsFile(_) | Self::InvalidFilename(_) => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            Self::FileTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            Self::MissingFileSetting(_) | Self::InvalidFileSettings(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Self::Multipart(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::FileNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(report) => {
                error!("Internal files error: {report:?}");
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

impl From<DbError> for FilesError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
