//! User repository

use crate::domain::entities::{NewUser, User};
use rolodex_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, username, email, password, created_at, confirmed, avatar, refresh_token";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by their globally unique account email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user.
    ///
    /// `new_user.password` is an opaque hash already; `avatar` is whatever
    /// the lookup collaborator produced (possibly absent). A duplicate
    /// account email maps to `AlreadyExists`.
    pub async fn create(&self, new_user: &NewUser, avatar: Option<&str>) -> Result<User> {
        new_user.validate()?;

        let user: User = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (id, username, email, password, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.constraint().is_some() => {
                RepositoryError::AlreadyExists
            }
            _ => RepositoryError::from(e),
        })?;

        Ok(user)
    }

    /// Overwrite the stored refresh token. `None` revokes; at most one
    /// valid refresh token exists per user at a time.
    pub async fn update_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()> {
        let result = sqlx::query("UPDATE users SET refresh_token = $2 WHERE id = $1")
            .bind(user_id)
            .bind(token)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }

    /// Mark the user behind an account email as confirmed.
    ///
    /// Unknown addresses fail with `NotFound`; confirming an
    /// already-confirmed user is a no-op success.
    pub async fn confirm_email(&self, email: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET confirmed = TRUE WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }

    /// Delete a user account. Owned emails, contacts and association rows
    /// go with it by cascade.
    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }
}
