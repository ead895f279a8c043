//! Contact repository
//!
//! Every operation takes the owning user id as an explicit scope. A
//! contact belonging to a different user is indistinguishable from a
//! missing one. The contact <-> email linkage lives in the
//! `contact_emails` association table and is replaced wholesale on
//! update, never merged.

use std::collections::HashMap;

use crate::domain::entities::{Contact, ContactData, Email};
use rolodex_common::Result;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Contact row without its linked emails
#[derive(Debug, Clone, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    surname: Option<String>,
    birthday: chrono::NaiveDate,
    description: Option<String>,
    user_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ContactRow {
    fn into_contact(self, emails: Vec<Email>) -> Contact {
        Contact {
            id: self.id,
            name: self.name,
            surname: self.surname,
            birthday: self.birthday,
            description: self.description,
            user_id: self.user_id,
            created_at: self.created_at,
            emails,
        }
    }
}

/// Email row joined with the association table, for batch loading
#[derive(Debug, sqlx::FromRow)]
struct LinkedEmailRow {
    contact_id: Uuid,
    id: Uuid,
    email: String,
    user_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List contacts owned by a user, in insertion order.
    ///
    /// Skip/take semantics: a negative offset is clamped to 0 and
    /// `limit: None` means unbounded (negative limits are normalized to
    /// `None` at the API boundary).
    pub async fn list(
        &self,
        user_id: Uuid,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, name, surname, birthday, description, user_id, created_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset.max(0))
        .bind(limit) // LIMIT NULL reads as unbounded in Postgres
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut links = self.load_linked_emails(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let emails = links.remove(&row.id).unwrap_or_default();
                row.into_contact(emails)
            })
            .collect())
    }

    /// Get a contact by id, scoped to its owner
    pub async fn get(&self, user_id: Uuid, contact_id: Uuid) -> Result<Option<Contact>> {
        let row: Option<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, name, surname, birthday, description, user_id, created_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut links = self.load_linked_emails(&[row.id]).await?;
                let emails = links.remove(&row.id).unwrap_or_default();
                Ok(Some(row.into_contact(emails)))
            }
            None => Ok(None),
        }
    }

    /// Create a contact and link the resolvable emails, in one unit of work.
    ///
    /// Email ids that do not exist or belong to another user are silently
    /// dropped from the linked set rather than rejected.
    pub async fn create(&self, user_id: Uuid, data: &ContactData) -> Result<Contact> {
        data.validate()?;

        let mut tx = self.pool.begin().await?;

        let row: ContactRow = sqlx::query_as(
            r#"
            INSERT INTO contacts (id, name, surname, birthday, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, surname, birthday, description, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.surname)
        .bind(data.birthday)
        .bind(&data.description)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let emails = link_owned_emails(&mut tx, row.id, user_id, &data.email_ids).await?;

        tx.commit().await?;

        Ok(row.into_contact(emails))
    }

    /// Update a contact and replace its full linked email set.
    ///
    /// Lookup is scoped to the owner, so a foreign-owned contact reads as
    /// not found. The prior association set is discarded and the new ids
    /// are re-resolved against the owner's emails, exactly as in create.
    pub async fn update(
        &self,
        user_id: Uuid,
        contact_id: Uuid,
        data: &ContactData,
    ) -> Result<Option<Contact>> {
        data.validate()?;

        let mut tx = self.pool.begin().await?;

        let row: Option<ContactRow> = sqlx::query_as(
            r#"
            UPDATE contacts
            SET name = $3, surname = $4, birthday = $5, description = $6
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, surname, birthday, description, user_id, created_at
            "#,
        )
        .bind(contact_id)
        .bind(user_id)
        .bind(&data.name)
        .bind(&data.surname)
        .bind(data.birthday)
        .bind(&data.description)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM contact_emails WHERE contact_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        let emails = link_owned_emails(&mut tx, row.id, user_id, &data.email_ids).await?;

        tx.commit().await?;

        Ok(Some(row.into_contact(emails)))
    }

    /// Delete a contact and return its last-known values.
    ///
    /// Association rows go with the contact; linked emails are never
    /// deleted. Deleting an already-deleted id returns `None`.
    pub async fn delete(&self, user_id: Uuid, contact_id: Uuid) -> Result<Option<Contact>> {
        let Some(contact) = self.get(user_id, contact_id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(contact_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        // A concurrent delete may have won the race after our read
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(contact))
    }

    /// Batch-load linked emails for a set of contact ids
    async fn load_linked_emails(&self, contact_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Email>>> {
        if contact_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<LinkedEmailRow> = sqlx::query_as(
            r#"
            SELECT ce.contact_id, e.id, e.email, e.user_id, e.created_at
            FROM contact_emails ce
            INNER JOIN emails e ON e.id = ce.email_id
            WHERE ce.contact_id = ANY($1)
            ORDER BY e.created_at ASC, e.id ASC
            "#,
        )
        .bind(contact_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut links: HashMap<Uuid, Vec<Email>> = HashMap::new();
        for row in rows {
            links.entry(row.contact_id).or_default().push(Email {
                id: row.id,
                email: row.email,
                user_id: row.user_id,
                created_at: row.created_at,
            });
        }
        Ok(links)
    }
}

/// Resolve email ids against the owner's emails and insert association
/// rows within an existing transaction. Unknown and foreign-owned ids
/// drop out of the resolved set.
async fn link_owned_emails(
    tx: &mut Transaction<'_, Postgres>,
    contact_id: Uuid,
    user_id: Uuid,
    email_ids: &[Uuid],
) -> std::result::Result<Vec<Email>, sqlx::Error> {
    if email_ids.is_empty() {
        return Ok(Vec::new());
    }

    let emails: Vec<Email> = sqlx::query_as(
        r#"
        SELECT id, email, user_id, created_at
        FROM emails
        WHERE id = ANY($1) AND user_id = $2
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(email_ids)
    .bind(user_id)
    .fetch_all(&mut **tx)
    .await?;

    for email in &emails {
        sqlx::query(
            r#"
            INSERT INTO contact_emails (contact_id, email_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(contact_id)
        .bind(email.id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(emails)
}
