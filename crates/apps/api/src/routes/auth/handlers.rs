//! HTTP handlers for authentication-related routes.

use crate::api_state::ApiContext;
use axum::{Form, Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{SignInForm, SignUpPayload, Token};
use common_services::api::auth::service::{
    authenticate_user, create_access_token, create_user, refresh_tokens, sign_out_user,
    store_refresh_token,
};
use common_services::api::auth::token::generate_refresh_token_parts;
use tracing::instrument;

const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/auth";

fn refresh_cookie(raw_token: String, expiry_days: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, raw_token))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(expiry_days))
        .build()
}

fn expired_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(REFRESH_COOKIE_PATH)
        .build()
}

/// Registers a new account.
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    tag = "Auth",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "Account created", body = bool),
        (status = 409, description = "A user with this email already exists"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn sign_up(
    State(context): State<ApiContext>,
    Json(payload): Json<SignUpPayload>,
) -> Result<(StatusCode, Json<bool>), AuthError> {
    create_user(&context.pool, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(true)))
}

/// Signs a user in with an OAuth2-password-style form and returns a bearer
/// access token. The refresh token is set as an httponly cookie.
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    tag = "Auth",
    request_body(content = SignInForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in", body = Token),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[instrument(skip(context, jar, form), err(Debug))]
pub async fn sign_in(
    State(context): State<ApiContext>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Result<(CookieJar, Json<Token>), AuthError> {
    let user = authenticate_user(&context.pool, &form.username, &form.password).await?;
    let access_token = create_access_token(
        &context.settings.secrets.jwt_key,
        &context.settings.auth,
        user.id,
    )?;
    let token_parts = generate_refresh_token_parts()?;
    store_refresh_token(&context.pool, &context.settings.auth, user.id, &token_parts).await?;

    let jar = jar.add(refresh_cookie(
        token_parts.raw_token,
        context.settings.auth.refresh_token_expiry_days,
    ));
    Ok((jar, Json(Token::bearer(access_token))))
}

/// Rotates the refresh token from the cookie and returns a fresh bearer
/// token. Requires bearer auth on top of the cookie.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Auth",
    responses(
        (status = 200, description = "Session refreshed", body = Token),
        (status = 401, description = "Invalid or expired refresh token"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, jar), err(Debug))]
pub async fn refresh_session(
    State(context): State<ApiContext>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Token>), AuthError> {
    let raw_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AuthError::MissingToken)?;

    let rotated = refresh_tokens(
        &context.pool,
        &context.settings.secrets.jwt_key,
        &context.settings.auth,
        &raw_token,
    )
    .await?;

    let jar = jar.add(refresh_cookie(
        rotated.refresh_token,
        context.settings.auth.refresh_token_expiry_days,
    ));
    Ok((jar, Json(Token::bearer(rotated.access_token))))
}

/// Signs the session out: the stored refresh token is deleted and the cookie
/// cleared.
#[utoipa::path(
    post,
    path = "/auth/sign-out",
    tag = "Auth",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Authentication required"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn sign_out(
    State(context): State<ApiContext>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AuthError> {
    if let Some(cookie) = jar.get(REFRESH_TOKEN_COOKIE) {
        sign_out_user(&context.pool, cookie.value()).await?;
    }
    let jar = jar.remove(expired_refresh_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}
