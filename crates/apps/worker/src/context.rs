use app_state::AppSettings;
use common_services::storage::StorageGateway;
use sqlx::PgPool;

pub struct WorkerContext {
    pub worker_id: String,
    pub pool: PgPool,
    pub settings: AppSettings,
    pub storage: StorageGateway,
}

impl WorkerContext {
    #[must_use]
    pub fn new(pool: PgPool, settings: AppSettings, worker_id: String) -> Self {
        let storage = StorageGateway::from_settings(&settings.storage, &settings.secrets);
        Self {
            worker_id,
            pool,
            settings,
            storage,
        }
    }
}
