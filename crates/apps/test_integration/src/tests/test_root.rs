use crate::test_context::TestContext;
use color_eyre::Result;

pub async fn test_health_endpoint(ctx: &TestContext) -> Result<()> {
    let response = ctx
        .http_client
        .get(ctx.url("/system/health"))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let healthy: bool = response.json().await?;
    assert!(healthy);
    Ok(())
}
