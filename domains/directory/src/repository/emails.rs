//! Email repository
//!
//! Ownership-scoped CRUD over email entries. The `(email, user_id)`
//! unique constraint surfaces as `RepositoryError::AlreadyExists`, never
//! as silent deduplication.

use crate::domain::entities::{validate_address, Email};
use rolodex_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct EmailRepository {
    pool: PgPool,
}

impl EmailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List emails owned by a user, in insertion order.
    ///
    /// Same skip/take semantics as the contact listing: negative offsets
    /// clamp to 0, `limit: None` means unbounded.
    pub async fn list(&self, user_id: Uuid, offset: i64, limit: Option<i64>) -> Result<Vec<Email>> {
        let emails: Vec<Email> = sqlx::query_as(
            r#"
            SELECT id, email, user_id, created_at
            FROM emails
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset.max(0))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }

    /// Get an email by id, scoped to its owner
    pub async fn get(&self, user_id: Uuid, email_id: Uuid) -> Result<Option<Email>> {
        let email: Option<Email> = sqlx::query_as(
            r#"
            SELECT id, email, user_id, created_at
            FROM emails
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(email_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(email)
    }

    /// Create an email entry for a user
    pub async fn create(&self, user_id: Uuid, address: &str) -> Result<Email> {
        validate_address(address)?;

        let email: Email = sqlx::query_as(
            r#"
            INSERT INTO emails (id, email, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, email, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(address)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.constraint().is_some() => {
                RepositoryError::AlreadyExists
            }
            _ => RepositoryError::from(e),
        })?;

        Ok(email)
    }

    /// Replace the address of an email entry
    pub async fn update(
        &self,
        user_id: Uuid,
        email_id: Uuid,
        address: &str,
    ) -> Result<Option<Email>> {
        validate_address(address)?;

        let email: Option<Email> = sqlx::query_as(
            r#"
            UPDATE emails
            SET email = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, email, user_id, created_at
            "#,
        )
        .bind(email_id)
        .bind(user_id)
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.constraint().is_some() => {
                RepositoryError::AlreadyExists
            }
            _ => RepositoryError::from(e),
        })?;

        Ok(email)
    }

    /// Delete an email entry and return its last-known values.
    ///
    /// Association rows referencing it are removed by cascade; contacts
    /// that linked it simply lose the link.
    pub async fn delete(&self, user_id: Uuid, email_id: Uuid) -> Result<Option<Email>> {
        let email: Option<Email> = sqlx::query_as(
            r#"
            DELETE FROM emails
            WHERE id = $1 AND user_id = $2
            RETURNING id, email, user_id, created_at
            "#,
        )
        .bind(email_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(email)
    }
}
