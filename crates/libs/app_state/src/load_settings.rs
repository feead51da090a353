use crate::AppSettings;
use color_eyre::eyre::Result;
use std::path::Path;

/// Loads settings from `config/settings.yaml`, layered with
/// `APP__`-prefixed environment variables.
///
/// # Errors
///
/// Returns an error when the configuration file is missing or a value fails
/// to deserialize into [`AppSettings`].
pub fn load_app_settings() -> Result<AppSettings> {
    // Load from dotenv first so a local .env can overwrite e.g. the db url.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new("config/settings.yaml"))
}

pub fn load_settings_from_path(config_path: &Path) -> Result<AppSettings> {
    let config_path = config_path.canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let settings = builder.build()?.try_deserialize::<AppSettings>()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use crate::{AppSettings, EnvironmentMode};

    const EXAMPLE: &str = r"
environment_mode: test
api:
  host: 127.0.0.1
  port: 8000
  public_url: http://localhost:8000
  allowed_origins: [http://localhost:5173]
  rate_limiting:
    req_per_second: 2
    burst_size: 100
database:
  max_connections: 10
  min_connections: 1
  acquire_timeout: 5
auth:
  access_token_expiry_minutes: 30
  refresh_token_expiry_days: 7
storage:
  endpoint_url: http://localhost:9000
  region: us-east-1
  bucket: fcs-files
  download_url_ttl_seconds: 60
worker:
  poll_interval_ms: 3000
  visibility_timeout_seconds: 300
  max_deliveries: 3
secrets:
  database_url: postgres://localhost/fcs_backend
  jwt_key: test-key
  storage_access_key_id: key
  storage_secret_access_key: secret
";

    #[test]
    fn deserializes_full_settings() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(EXAMPLE, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<AppSettings>()
            .unwrap();

        assert_eq!(settings.environment_mode, EnvironmentMode::Test);
        assert_eq!(settings.api.port, 8000);
        assert_eq!(settings.auth.refresh_token_expiry_days, 7);
        assert_eq!(settings.storage.download_url_ttl_seconds, 60);
        assert_eq!(settings.worker.max_deliveries, 3);
    }
}
