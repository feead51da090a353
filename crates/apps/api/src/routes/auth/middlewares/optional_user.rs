use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{decode_token, extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::database::stores::user_store::UserStore;
use common_services::database::tables::user::User;

/// Extractor for routes anonymous callers may use too. A missing token means
/// an anonymous request; a token that is present but invalid is still
/// rejected rather than silently downgraded.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(token) = extract_token(parts) else {
            let anonymous = Self(None);
            parts.extensions.insert(anonymous.clone());
            return Ok(anonymous);
        };
        let context = extract_context(parts, state).await?;
        let claims = decode_token(&token, &context.settings.secrets.jwt_key)?;
        let user = UserStore::find_by_id(&context.pool, claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let authenticated = Self(Some(user));
        parts.extensions.insert(authenticated.clone());
        Ok(authenticated)
    }
}
