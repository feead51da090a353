use crate::test_context::TestContext;
use color_eyre::Result;
use common_services::api::auth::interfaces::Token;
use serde_json::json;

pub async fn test_sign_up_conflict(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let payload = json!({ "email": "first@example.com", "password": "first@example.com" });

    let response = client
        .post(ctx.url("/auth/sign-up"))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let created: bool = response.json().await?;
    assert!(created);

    let duplicate = client
        .post(ctx.url("/auth/sign-up"))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(duplicate.status(), reqwest::StatusCode::CONFLICT);

    Ok(())
}

pub async fn test_sign_in_and_bearer_access(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "bearer@example.com").await?;

    // An authenticated call works, an unauthenticated one does not.
    let mine = client
        .get(ctx.url("/files/mine"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(mine.status(), reqwest::StatusCode::OK);

    let anonymous = client.get(ctx.url("/files/mine")).send().await?;
    assert_eq!(anonymous.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_refresh_rotation(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "refresh@example.com").await?;

    // The sign-in left the refresh cookie in the jar; refresh rotates it and
    // returns a fresh bearer token.
    let response = client
        .post(ctx.url("/auth/refresh"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let new_token: Token = response.json().await?;
    assert_eq!(new_token.token_type, "Bearer");

    let mine = client
        .get(ctx.url("/files/mine"))
        .bearer_auth(&new_token.access_token)
        .send()
        .await?;
    assert_eq!(mine.status(), reqwest::StatusCode::OK);

    Ok(())
}

pub async fn test_sign_out(ctx: &TestContext) -> Result<()> {
    let client = ctx.fresh_client();
    let token = ctx.sign_up_and_in(&client, "signout@example.com").await?;

    let response = client
        .post(ctx.url("/auth/sign-out"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    // The stored refresh token is gone and the cookie cleared; a refresh
    // attempt with the still-valid access token has nothing to rotate.
    let refresh = client
        .post(ctx.url("/auth/refresh"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(refresh.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}
