use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload for account creation.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SignUpPayload {
    /// Doubles as the username.
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// OAuth2-password-style sign-in form.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SignInForm {
    /// The email address.
    pub username: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Bearer access token handed to clients; the refresh token travels in an
/// httponly cookie instead.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
}

impl Token {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            token_type: "Bearer".to_string(),
            access_token,
        }
    }
}

/// Claims contained within an access token.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AuthClaims {
    /// Subject (user ID).
    pub sub: i32,
    /// Expiration time (unix seconds).
    pub exp: i64,
}
