use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::storage::StorageGateway;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub storage: StorageGateway,
}

// These impls allow Axum to extract parts of the state directly, which keeps
// middleware and extractors that only need one piece decoupled from the rest.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for StorageGateway {
    fn from_ref(state: &ApiContext) -> Self {
        state.storage.clone()
    }
}
