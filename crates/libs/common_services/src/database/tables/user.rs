use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    /// The user's email address.
    pub username: String,
    pub email_verified: bool,
}

/// Same row including the password hash; only the auth service reads this.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub username: String,
    pub hashed_password: String,
    pub email_verified: bool,
}
