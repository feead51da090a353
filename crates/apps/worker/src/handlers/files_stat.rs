use crate::context::WorkerContext;
use color_eyre::Result;
use common_services::api::jobs::interfaces::FilesStatResult;
use common_services::database::stores::file_store::FileStore;
use common_services::database::tables::queue_message::QueueMessage;
use common_services::job_queue::FilesStatArgs;
use serde_json::Value;

/// Aggregates count and total size over all files owned by the given user.
/// A user with zero files yields zero count and zero sum, never an error, so
/// the job result is stable under repeated runs.
pub async fn handle(context: &WorkerContext, message: &QueueMessage) -> Result<Value> {
    let args: FilesStatArgs = serde_json::from_value(message.payload.clone())?;

    let (files_count, files_size_byte_sum) =
        FileStore::stats_for_user(&context.pool, args.user_id).await?;

    let result = FilesStatResult {
        files_count,
        files_size_byte_sum,
    };
    Ok(serde_json::to_value(result)?)
}
