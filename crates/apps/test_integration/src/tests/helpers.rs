use crate::test_context::TestContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

/// Posts a multipart upload, optionally authenticated, optionally with a
/// settings JSON array.
pub async fn upload(
    ctx: &TestContext,
    client: &reqwest::Client,
    token: Option<&str>,
    files: &[(&str, Vec<u8>)],
    settings: Option<Value>,
) -> Result<reqwest::Response> {
    let mut form = reqwest::multipart::Form::new();
    for (name, bytes) in files {
        let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name((*name).to_string());
        form = form.part("upload_files", part);
    }
    if let Some(settings) = settings {
        form = form.text("upload_file_settings", settings.to_string());
    }

    let mut request = client.post(ctx.url("/files/upload")).multipart(form);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    Ok(request.send().await?)
}

/// Polls a job endpoint until the record turns FINISHED.
pub async fn poll_job_until_finished(
    ctx: &TestContext,
    client: &reqwest::Client,
    token: &str,
    path: &str,
) -> Result<Value> {
    for _ in 0..80 {
        let record: Value = client
            .get(ctx.url(path))
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;
        match record["status"].as_str() {
            Some("FINISHED") => return Ok(record),
            Some("FAILED") => return Err(eyre!("job failed: {record}")),
            _ => sleep(Duration::from_millis(250)).await,
        }
    }
    Err(eyre!("job at {} did not finish in time", path))
}
