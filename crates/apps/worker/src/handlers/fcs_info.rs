use crate::context::WorkerContext;
use color_eyre::Result;
use color_eyre::eyre::bail;
use common_services::api::jobs::interfaces::FcsInfoResult;
use common_services::database::stores::file_store::FileStore;
use common_services::database::tables::queue_message::QueueMessage;
use common_services::job_queue::FcsInfoArgs;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::task;

/// Parses the header of one stored FCS file.
///
/// The lookup is ownership-scoped: a file identifier that exists but belongs
/// to another user is treated exactly like a missing one.
pub async fn handle(context: &WorkerContext, message: &QueueMessage) -> Result<Value> {
    let args: FcsInfoArgs = serde_json::from_value(message.payload.clone())?;

    let Some(file) =
        FileStore::find_owned_detail(&context.pool, args.file_idno, args.user_id).await?
    else {
        bail!("file {} not found for user {}", args.file_idno, args.user_id);
    };
    let Some(s3_key) = file.s3_key.clone() else {
        bail!("file {} has no stored object", args.file_idno);
    };

    // Stream the object into a temporary file; FCS containers can run to
    // hundreds of megabytes while only the header and TEXT segment are read.
    let mut body = context.storage.get_object(&s3_key).await?;
    let mut tmp = tokio::fs::File::from_std(tempfile::tempfile()?);
    while let Some(chunk) = body.try_next().await? {
        tmp.write_all(&chunk).await?;
    }
    tmp.flush().await?;

    let mut std_file = tmp.into_std().await;
    let metadata =
        task::spawn_blocking(move || fcs_reader::read_metadata(&mut std_file)).await??;

    let result = FcsInfoResult {
        file_name: file.file_name,
        file_size_byte: file.file_size_byte,
        file_upload_time: file.upload_time,
        fcs_version: metadata.version,
        fcs_pnn_labels: metadata.pnn_labels,
        fcs_event_count: metadata.event_count,
    };
    Ok(serde_json::to_value(result)?)
}
