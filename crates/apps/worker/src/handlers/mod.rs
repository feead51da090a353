use crate::context::WorkerContext;
use color_eyre::Result;
use common_services::database::tables::job::JobType;
use common_services::database::tables::queue_message::QueueMessage;
use serde_json::Value;

pub mod fcs_info;
pub mod files_stat;

/// Dispatches a claimed message to its handler. The mapping from job type to
/// handler is this match, resolved at compile time; adding a job type without
/// a handler is a compile error.
///
/// On success the returned value is the type-appropriate result payload that
/// finalization writes to the job record.
///
/// # Errors
///
/// Returns the handler's error; the caller turns it into a FAILED job record.
pub async fn handle_job(context: &WorkerContext, message: &QueueMessage) -> Result<Value> {
    match message.job_type {
        JobType::FilesStat => files_stat::handle(context, message).await,
        JobType::FcsInfo => fcs_info::handle(context, message).await,
    }
}
