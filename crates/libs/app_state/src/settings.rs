use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub environment_mode: EnvironmentMode,
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub worker: WorkerSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Development,
    Staging,
    Production,
    Test,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    /// Base URL clients reach the API on; used by the integration harness.
    pub public_url: String,
    pub allowed_origins: Vec<String>,
    pub rate_limiting: RateLimitingSettings,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RateLimitingSettings {
    pub req_per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AuthSettings {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub endpoint_url: String,
    pub region: String,
    pub bucket: String,
    pub download_url_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WorkerSettings {
    pub poll_interval_ms: u64,
    /// How long a claimed queue message stays invisible before it is
    /// considered abandoned and redelivered.
    pub visibility_timeout_seconds: f64,
    pub max_deliveries: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
    pub jwt_key: String,
    pub storage_access_key_id: String,
    pub storage_secret_access_key: String,
}
