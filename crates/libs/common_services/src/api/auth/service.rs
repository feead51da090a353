use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::AuthClaims;
use crate::api::auth::token::{
    RefreshTokenParts, generate_refresh_token_parts, split_refresh_token, verify_token,
};
use crate::database::stores::user_store::UserStore;
use crate::database::tables::user::{User, UserWithPassword};
use app_state::AuthSettings;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::{Executor, PgPool, Postgres};
use tracing::info;

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
pub async fn authenticate_user(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_username_with_password(pool, username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_ref(), &user.hashed_password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Creates a new user account.
///
/// # Errors
///
/// * `AuthError::UserAlreadyExists` if a user with the given email already
///   exists, whether detected up front or through the unique constraint.
pub async fn create_user(pool: &PgPool, email: &str, password: &str) -> Result<User, AuthError> {
    if UserStore::find_by_username(pool, email).await?.is_some() {
        return Err(AuthError::UserAlreadyExists);
    }

    let hashed = hash_password(password.as_ref())?;
    info!("Creating user {}", email);
    match UserStore::create(pool, email, &hashed).await {
        Ok(user) => Ok(user),
        Err(err) if err.is_unique_violation() => Err(AuthError::UserAlreadyExists),
        Err(err) => Err(err.into()),
    }
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token<'c, E>(
    executor: E,
    auth_settings: &AuthSettings,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError>
where
    E: Executor<'c, Database = Postgres>,
{
    let exp = Utc::now() + Duration::days(auth_settings.refresh_token_expiry_days);
    sqlx::query(
        "INSERT INTO refresh_tokens (user_id, selector, verifier_hash, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&parts.selector)
    .bind(&parts.verifier_hash)
    .bind(exp)
    .execute(executor)
    .await?;
    Ok(())
}

/// Creates a new signed access token for a given user ID.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if token encoding fails.
pub fn create_access_token(
    jwt_key: &str,
    auth_settings: &AuthSettings,
    user_id: i32,
) -> Result<String, AuthError> {
    let exp = (Utc::now() + Duration::minutes(auth_settings.access_token_expiry_minutes))
        .timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_key.as_ref()),
    )?;
    Ok(access_token)
}

/// Outcome of a refresh-token rotation: a fresh access token plus the raw
/// refresh token to put in the replacement cookie.
pub struct RotatedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Handles refresh token rotation, invalidating the old token and issuing a
/// new pair.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the provided refresh token is malformed, or
///   its verifier does not match (treated as theft: every refresh token of
///   that user is revoked).
/// * `AuthError::RefreshTokenExpiredOrNotFound` if the token is unknown or
///   expired.
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_key: &str,
    auth_settings: &AuthSettings,
    raw_token: &str,
) -> Result<RotatedTokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = sqlx::query_as::<_, (i32, String)>(
        "SELECT user_id, verifier_hash FROM refresh_tokens
         WHERE selector = $1 AND expires_at > NOW()",
    )
    .bind(&selector)
    .fetch_optional(pool)
    .await?
    .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;
    let (user_id, verifier_hash) = record;

    if !verify_token(&verifier_bytes, &verifier_hash)? {
        // A wrong verifier for a known selector smells like token theft:
        // revoke every refresh token of that user.
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
        return Err(AuthError::InvalidToken);
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM refresh_tokens WHERE selector = $1")
        .bind(&selector)
        .execute(&mut *tx)
        .await?;

    let new_parts = generate_refresh_token_parts()?;
    store_refresh_token(&mut *tx, auth_settings, user_id, &new_parts).await?;

    tx.commit().await?;

    let access_token = create_access_token(jwt_key, auth_settings, user_id)?;
    Ok(RotatedTokens {
        access_token,
        refresh_token: new_parts.raw_token,
    })
}

/// Deletes the refresh token matching the provided one, signing the session
/// out. Always appears successful to prevent token enumeration.
pub async fn sign_out_user(pool: &PgPool, raw_token: &str) -> Result<(), AuthError> {
    if let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token)
        && let Some((_user_id, verifier_hash)) = sqlx::query_as::<_, (i32, String)>(
            "SELECT user_id, verifier_hash FROM refresh_tokens WHERE selector = $1",
        )
        .bind(&selector)
        .fetch_optional(pool)
        .await?
        && verify_token(&verifier_bytes, &verifier_hash).unwrap_or(false)
    {
        sqlx::query("DELETE FROM refresh_tokens WHERE selector = $1")
            .bind(&selector)
            .execute(pool)
            .await?;
    }
    Ok(())
}
