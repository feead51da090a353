use crate::database::tables::job::JobType;
use serde_json::Value;
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type)]
#[sqlx(type_name = "queue_message_status", rename_all = "snake_case")]
pub enum QueueMessageStatus {
    Queued,
    Delivered,
}

/// One unit of work on the broker. Carries only the job type and the domain
/// arguments; the job record is resolved by `queue_job_id` at execution time.
#[derive(Debug, Clone, FromRow)]
pub struct QueueMessage {
    pub id: i64,
    pub queue_job_id: Uuid,
    pub job_type: JobType,
    pub payload: Value,
    /// Including the current one; redelivery after a lapsed visibility
    /// timeout increments this.
    pub deliveries: i32,
}
