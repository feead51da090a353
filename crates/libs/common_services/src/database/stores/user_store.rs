use crate::database::DbError;
use crate::database::tables::user::{User, UserWithPassword};
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Creates a new user. The username is unique; a duplicate surfaces as a
    /// unique-constraint violation.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (username, hashed_password, email_verified)
            VALUES ($1, $2, FALSE)
            RETURNING id, username, email_verified
            ",
        )
        .bind(username)
        .bind(hashed_password)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, email_verified FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_username(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, email_verified FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_username_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            r"
            SELECT id, username, hashed_password, email_verified
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
