use crate::api_state::ApiContext;
use crate::auth::handlers::{refresh_session, sign_in, sign_out, sign_up};
use app_state::RateLimitingSettings;
use axum::{Router, routing::post};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tracing::info;

pub fn auth_public_router(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limiting.req_per_second)
        .burst_size(rate_limiting.burst_size)
        .finish()
        .expect("Could not create rate-limiting governor.");

    info!(
        "Using request limits: {} req/s, burst {}",
        rate_limiting.req_per_second, rate_limiting.burst_size
    );

    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .layer(GovernorLayer::new(governor_conf))
}

pub fn auth_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/auth/refresh", post(refresh_session))
        .route("/auth/sign-out", post(sign_out))
}
