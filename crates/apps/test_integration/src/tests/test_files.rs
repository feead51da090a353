use crate::test_context::TestContext;
use crate::tests::helpers::upload;
use crate::utils::synthesize_fcs_bytes;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde_json::{Value, json};

fn sample_fcs() -> Vec<u8> {
    synthesize_fcs_bytes(&[
        ("$PAR", "2"),
        ("$P1N", "FSC-A"),
        ("$P2N", "SSC-A"),
        ("$TOT", "1234"),
    ])
}

pub async fn test_upload_rejects_wrong_extension(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "files-ext@example.com").await?;

    let response = upload(
        ctx,
        &client,
        Some(&token),
        &[("data.txt", b"not cytometry".to_vec())],
        Some(json!([{ "filename": "data.txt", "public": true }])),
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);

    Ok(())
}

pub async fn test_upload_requires_settings_when_authenticated(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx
        .sign_up_and_in(&client, "files-settings@example.com")
        .await?;

    let response = upload(
        ctx,
        &client,
        Some(&token),
        &[("sample.fcs", sample_fcs())],
        None,
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

pub async fn test_public_file_round_trip(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx
        .sign_up_and_in(&client, "files-public@example.com")
        .await?;
    let content = sample_fcs();

    let response = upload(
        ctx,
        &client,
        Some(&token),
        &[("public_sample.fcs", content.clone())],
        Some(json!([{ "filename": "public_sample.fcs", "public": true }])),
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let batch: Value = response.json().await?;

    // Every input is accounted for, either stored or failed.
    let files = batch["files"].as_array().ok_or_else(|| eyre!("no files"))?;
    let failed = batch["failed_files"]
        .as_array()
        .ok_or_else(|| eyre!("no failed_files"))?;
    assert_eq!(files.len() + failed.len(), 1);
    assert_eq!(files.len(), 1);

    // Storage keys are exactly `{batch_idno}/{filename}`.
    let batch_idno = batch["batch_idno"].as_str().expect("batch_idno");
    let file = &files[0];
    assert_eq!(
        file["s3_key"].as_str().expect("s3_key"),
        format!("{batch_idno}/public_sample.fcs")
    );

    // A public file is visible and downloadable anonymously.
    let file_idno = file["file_idno"].as_str().expect("file_idno");
    let anonymous = ctx.fresh_client();
    let info = anonymous
        .get(ctx.url(&format!("/files/{file_idno}")))
        .send()
        .await?;
    assert_eq!(info.status(), reqwest::StatusCode::OK);

    let url_response = anonymous
        .get(ctx.url(&format!("/files/{file_idno}/generate-download-url")))
        .send()
        .await?;
    assert_eq!(url_response.status(), reqwest::StatusCode::CREATED);
    let signed_url: String = url_response.json().await?;

    // Round-trip: the signed URL yields byte-identical content.
    let downloaded = reqwest::get(&signed_url).await?.bytes().await?;
    assert_eq!(downloaded.to_vec(), content);

    Ok(())
}

pub async fn test_private_file_visibility(ctx: &TestContext) -> Result<()> {
    let owner = ctx.fresh_client();
    let owner_token = ctx
        .sign_up_and_in(&owner, "files-private-owner@example.com")
        .await?;

    let response = upload(
        ctx,
        &owner,
        Some(&owner_token),
        &[("private_sample.fcs", sample_fcs())],
        Some(json!([{ "filename": "private_sample.fcs", "public": false }])),
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let batch: Value = response.json().await?;
    let file_idno = batch["files"][0]["file_idno"].as_str().expect("file_idno");
    assert_eq!(batch["files"][0]["public"], json!(false));

    // Owner sees it.
    let as_owner = owner
        .get(ctx.url(&format!("/files/{file_idno}")))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(as_owner.status(), reqwest::StatusCode::OK);

    // Anonymous and another user get the identical 404.
    let anonymous = ctx.fresh_client();
    let as_anonymous = anonymous
        .get(ctx.url(&format!("/files/{file_idno}")))
        .send()
        .await?;
    assert_eq!(as_anonymous.status(), reqwest::StatusCode::NOT_FOUND);

    let other = ctx.fresh_client();
    let other_token = ctx
        .sign_up_and_in(&other, "files-private-other@example.com")
        .await?;
    let as_other = other
        .get(ctx.url(&format!("/files/{file_idno}")))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(as_other.status(), reqwest::StatusCode::NOT_FOUND);

    let download_anonymous = anonymous
        .get(ctx.url(&format!("/files/{file_idno}/generate-download-url")))
        .send()
        .await?;
    assert_eq!(download_anonymous.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

pub async fn test_anonymous_upload_is_public(ctx: &TestContext) -> Result<()> {
    let anonymous = ctx.fresh_client();

    let response = upload(
        ctx,
        &anonymous,
        None,
        &[("anon_sample.fcs", sample_fcs())],
        None,
    )
    .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let batch: Value = response.json().await?;
    let file = &batch["files"][0];
    assert_eq!(file["public"], json!(true));

    // Visible to any other anonymous caller.
    let file_idno = file["file_idno"].as_str().expect("file_idno");
    let someone_else = ctx.fresh_client();
    let info = someone_else
        .get(ctx.url(&format!("/files/{file_idno}")))
        .send()
        .await?;
    assert_eq!(info.status(), reqwest::StatusCode::OK);

    Ok(())
}
