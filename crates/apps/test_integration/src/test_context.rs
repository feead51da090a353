use crate::utils::{create_test_database, create_test_settings};
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::Token;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

const TEST_DATABASE_NAME: &str = "fcs_backend_integration_test";

pub struct TestContext {
    pub settings: AppSettings,
    pub pool: PgPool,
    pub http_client: reqwest::Client,
}

impl TestContext {
    /// Boots a scratch database, the API server, and one worker in-process.
    pub async fn new() -> Result<Self> {
        let base_settings = load_settings_from_path(Path::new("config/settings.yaml"))?;
        let settings = create_test_settings(TEST_DATABASE_NAME, &base_settings)?;
        let (pool, _management_pool) = create_test_database(&base_settings, TEST_DATABASE_NAME).await?;

        // Both tasks run detached for the lifetime of the harness process.
        let _api_task = tokio::spawn(api::serve(pool.clone(), settings.clone()));
        let _worker_task = tokio::spawn(worker::worker::create_worker(
            pool.clone(),
            settings.clone(),
            false,
        ));

        let http_client = reqwest::Client::builder().cookie_store(true).build()?;

        let context = Self {
            settings,
            pool,
            http_client,
        };
        context.wait_for_api().await?;
        info!("Test context ready on {}", context.settings.api.public_url);
        Ok(context)
    }

    async fn wait_for_api(&self) -> Result<()> {
        let url = self.url("/system/health");
        for _ in 0..40 {
            if let Ok(response) = self.http_client.get(&url).send().await
                && response.status().is_success()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(250)).await;
        }
        Err(eyre!("API did not come up on {}", url))
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api.public_url, path)
    }

    /// Fresh client without cookie sharing, for anonymous or second-user
    /// requests.
    #[must_use]
    pub fn fresh_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("client")
    }

    /// Signs a user up (ignoring conflicts) and signs in, returning the
    /// bearer access token.
    pub async fn sign_up_and_in(&self, client: &reqwest::Client, email: &str) -> Result<String> {
        client
            .post(self.url("/auth/sign-up"))
            .json(&serde_json::json!({ "email": email, "password": email }))
            .send()
            .await?;

        let response = client
            .post(self.url("/auth/sign-in"))
            .form(&[("username", email), ("password", email)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(eyre!("sign-in failed for {}: {}", email, response.status()));
        }
        let token: Token = response.json().await?;
        Ok(token.access_token)
    }
}
