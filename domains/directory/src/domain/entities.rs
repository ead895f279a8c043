//! Domain entities for the Rolodex directory domain
//!
//! Users own private sets of contacts and emails. Every entity carries
//! its owning `user_id`; repositories thread that ownership scope through
//! every query. Input types validate here, before anything reaches the
//! storage boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rolodex_common::{Error, Result};
use validator::ValidateEmail;

/// Maximum length of a contact name
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length of a contact surname
pub const SURNAME_MAX_LEN: usize = 100;

/// Maximum length of a contact description
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Maximum length of a stored email address
pub const ADDRESS_MAX_LEN: usize = 100;

/// Maximum length of a username
pub const USERNAME_MAX_LEN: usize = 50;

/// User entity — the identity root owning contacts and emails.
///
/// `password` is an opaque credential hash by the time it reaches this
/// domain; hashing happens in the external auth service. It is never
/// serialized into responses.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub confirmed: bool,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
}

/// Email entity — a contact address entry owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Email {
    pub id: Uuid,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Contact entity — a person record with its linked email set.
///
/// The email linkage is multi-valued (association table), never a scalar
/// foreign key: create accepts a list of email ids and update replaces
/// the full set. Linked emails always belong to the contact's owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub surname: Option<String>,
    pub birthday: NaiveDate,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub emails: Vec<Email>,
}

/// Input for creating or updating a contact.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactData {
    pub name: String,
    pub surname: Option<String>,
    pub birthday: NaiveDate,
    pub description: Option<String>,
    /// Email ids to link. Ids not owned by the acting user (or not
    /// existing at all) are silently dropped during resolution.
    pub email_ids: Vec<Uuid>,
}

impl ContactData {
    /// Validate invariants before any write
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.chars().count() > NAME_MAX_LEN {
            return Err(Error::Validation(format!(
                "Name must be 1-{} characters",
                NAME_MAX_LEN
            )));
        }

        if let Some(ref surname) = self.surname {
            if surname.chars().count() > SURNAME_MAX_LEN {
                return Err(Error::Validation(format!(
                    "Surname must be at most {} characters",
                    SURNAME_MAX_LEN
                )));
            }
        }

        if let Some(ref description) = self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                return Err(Error::Validation(format!(
                    "Description must be at most {} characters",
                    DESCRIPTION_MAX_LEN
                )));
            }
        }

        // Strictly in the past: today is not a valid birthday
        if self.birthday >= Utc::now().date_naive() {
            return Err(Error::Validation(
                "Birthday must be a date in the past".to_string(),
            ));
        }

        Ok(())
    }
}

/// Input for registering a user. `password` is already a hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Validate invariants before any write
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.username.chars().count() > USERNAME_MAX_LEN {
            return Err(Error::Validation(format!(
                "Username must be 1-{} characters",
                USERNAME_MAX_LEN
            )));
        }

        validate_address(&self.email)?;

        if self.password.is_empty() {
            return Err(Error::Validation(
                "Credential hash must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validate an email address value for storage
pub fn validate_address(address: &str) -> Result<()> {
    if !address.validate_email() {
        return Err(Error::Validation("Invalid email format".to_string()));
    }
    if address.chars().count() > ADDRESS_MAX_LEN {
        return Err(Error::Validation(format!(
            "Email must be at most {} characters",
            ADDRESS_MAX_LEN
        )));
    }
    Ok(())
}
