use crate::test_context::TestContext;
use crate::tests::helpers::{poll_job_until_finished, upload};
use crate::utils::synthesize_fcs_bytes;
use color_eyre::Result;
use serde_json::{Value, json};

pub async fn test_stat_job_zero_files(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "jobs-zero@example.com").await?;

    let response = client
        .post(ctx.url("/me/files/stat-jobs/create"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let queue_job_id: String = response.json().await?;

    // Immediately after create, the record exists and has not jumped states.
    let immediate: Value = client
        .get(ctx.url(&format!("/me/files/stat-jobs/{queue_job_id}")))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(matches!(
        immediate["status"].as_str(),
        Some("PENDING" | "RUNNING" | "FINISHED")
    ));

    let record = poll_job_until_finished(
        ctx,
        &client,
        &token,
        &format!("/me/files/stat-jobs/{queue_job_id}"),
    )
    .await?;

    // Zero files yields zero count and zero sum, never an error.
    assert_eq!(record["result"]["files_count"], json!(0));
    assert_eq!(record["result"]["files_size_byte_sum"], json!(0));
    assert!(record["job_working_duration_second"].is_number());

    Ok(())
}

pub async fn test_stat_job_idempotence(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "jobs-stat@example.com").await?;

    let first = synthesize_fcs_bytes(&[("$PAR", "1"), ("$P1N", "FSC-A"), ("$TOT", "10")]);
    let second = synthesize_fcs_bytes(&[("$PAR", "1"), ("$P1N", "SSC-A"), ("$TOT", "20")]);
    let expected_sum = (first.len() + second.len()) as i64;

    let response = upload(
        ctx,
        &client,
        Some(&token),
        &[("stat_a.fcs", first), ("stat_b.fcs", second)],
        Some(json!([
            { "filename": "stat_a.fcs", "public": true },
            { "filename": "stat_b.fcs", "public": true },
        ])),
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    // Running the job twice over unchanged files yields identical results.
    let mut results = Vec::new();
    for _ in 0..2 {
        let created = client
            .post(ctx.url("/me/files/stat-jobs/create"))
            .bearer_auth(&token)
            .send()
            .await?;
        let queue_job_id: String = created.json().await?;
        let record = poll_job_until_finished(
            ctx,
            &client,
            &token,
            &format!("/me/files/stat-jobs/{queue_job_id}"),
        )
        .await?;
        results.push(record["result"].clone());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0]["files_count"], json!(2));
    assert_eq!(results[0]["files_size_byte_sum"], json!(expected_sum));

    Ok(())
}

pub async fn test_job_ownership_isolation(ctx: &TestContext) -> Result<()> {
    let owner = ctx.fresh_client();
    let owner_token = ctx
        .sign_up_and_in(&owner, "jobs-owner@example.com")
        .await?;

    let created = owner
        .post(ctx.url("/me/files/stat-jobs/create"))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    let queue_job_id: String = created.json().await?;

    let other = ctx.fresh_client();
    let other_token = ctx
        .sign_up_and_in(&other, "jobs-other@example.com")
        .await?;
    let as_other = other
        .get(ctx.url(&format!("/me/files/stat-jobs/{queue_job_id}")))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(as_other.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_fcs_info_job(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "jobs-info@example.com").await?;

    let content = synthesize_fcs_bytes(&[
        ("$PAR", "3"),
        ("$P1N", "FSC-A"),
        ("$P2N", "SSC-A"),
        ("$P3N", "FL1-A"),
        ("$TOT", "10000"),
    ]);
    let content_len = content.len() as i64;

    let response = upload(
        ctx,
        &client,
        Some(&token),
        &[("info_sample.fcs", content)],
        Some(json!([{ "filename": "info_sample.fcs", "public": false }])),
    )
    .await?;
    let batch: Value = response.json().await?;
    let file_idno = batch["files"][0]["file_idno"].as_str().expect("file_idno");

    let created = client
        .post(ctx.url(&format!(
            "/fcs-files/fcs-info-jobs/create?file_idno={file_idno}"
        )))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let queue_job_id: String = created.json().await?;

    let record = poll_job_until_finished(
        ctx,
        &client,
        &token,
        &format!("/fcs-files/fcs-info-jobs/{queue_job_id}"),
    )
    .await?;

    let result = &record["result"];
    assert_eq!(result["file_name"], json!("info_sample.fcs"));
    assert_eq!(result["file_size_byte"], json!(content_len));
    assert_eq!(result["fcs_version"], json!("FCS3.1"));
    assert_eq!(result["fcs_pnn_labels"], json!(["FSC-A", "SSC-A", "FL1-A"]));
    assert_eq!(result["fcs_event_count"], json!(10000));
    assert!(result["file_upload_time"].is_string());

    Ok(())
}

pub async fn test_fcs_info_job_rejects_foreign_file(ctx: &TestContext) -> Result<()> {
    let owner = ctx.fresh_client();
    let owner_token = ctx
        .sign_up_and_in(&owner, "jobs-foreign-owner@example.com")
        .await?;

    let content = synthesize_fcs_bytes(&[("$PAR", "1"), ("$P1N", "FSC-A"), ("$TOT", "5")]);
    let response = upload(
        ctx,
        &owner,
        Some(&owner_token),
        &[("foreign.fcs", content)],
        Some(json!([{ "filename": "foreign.fcs", "public": true }])),
    )
    .await?;
    let batch: Value = response.json().await?;
    let file_idno = batch["files"][0]["file_idno"].as_str().expect("file_idno");

    // Even a public file cannot be analyzed by someone who does not own it.
    let other = ctx.fresh_client();
    let other_token = ctx
        .sign_up_and_in(&other, "jobs-foreign-other@example.com")
        .await?;
    let created = other
        .post(ctx.url(&format!(
            "/fcs-files/fcs-info-jobs/create?file_idno={file_idno}"
        )))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(created.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}
