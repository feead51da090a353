use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "job_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FilesStat,
    FcsInfo,
}

/// Lifecycle of a job record. Transitions are monotonic: pending → running →
/// (finished | failed); a worker never moves a job backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Running,
    Finished,
    Failed,
}

#[derive(Debug, Clone, FromRow)]
pub struct Job {
    pub id: i64,
    /// Broker-assigned identifier, set at enqueue time; unique and immutable.
    pub queue_job_id: Option<Uuid>,
    pub job_type: JobType,
    /// Echo of the arguments the worker needs, as submitted.
    pub job_args: Option<Value>,
    pub status: JobStatus,
    /// Wall-clock seconds from claim to finalization; NULL until terminal.
    pub job_working_duration_second: Option<f64>,
    /// Type-dependent payload; populated only when status is finished.
    pub result: Option<Value>,
    pub failure_reason: Option<String>,
    pub user_id: i32,
}
