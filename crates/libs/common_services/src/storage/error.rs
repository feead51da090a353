use thiserror::Error;

/// Transport-level failures against the object store. The message carries the
/// underlying SDK error chain so per-file upload failures stay diagnosable.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("put {key} failed: {message}")]
    Put { key: String, message: String },

    #[error("get {key} failed: {message}")]
    Get { key: String, message: String },

    #[error("head {key} failed: {message}")]
    Head { key: String, message: String },

    #[error("delete {key} failed: {message}")]
    Delete { key: String, message: String },

    #[error("presigning {key} failed: {message}")]
    Presign { key: String, message: String },
}
