//! Contact API handlers
//!
//! All operations are scoped to the authenticated user resolved by the
//! `AuthUser` extractor; a contact owned by someone else answers 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rolodex_auth::AuthUser;
use rolodex_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::DirectoryState;
use crate::domain::entities::{Contact, ContactData, Email};

/// Request body for creating or replacing a contact
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[validate(length(max = 100))]
    pub surname: Option<String>,

    #[validate(custom(function = "validate_past_date", message = "must be in the past"))]
    pub birthday: NaiveDate,

    #[validate(length(max = 250))]
    pub description: Option<String>,

    /// Email ids to link; unknown or foreign-owned ids are dropped
    #[serde(default)]
    pub email_ids: Vec<Uuid>,
}

fn validate_past_date(birthday: &NaiveDate) -> std::result::Result<(), validator::ValidationError> {
    if *birthday >= Utc::now().date_naive() {
        return Err(validator::ValidationError::new("past_date"));
    }
    Ok(())
}

impl From<ContactRequest> for ContactData {
    fn from(req: ContactRequest) -> Self {
        ContactData {
            name: req.name,
            surname: req.surname,
            birthday: req.birthday,
            description: req.description,
            email_ids: req.email_ids,
        }
    }
}

/// Linked email view embedded in contact responses
#[derive(Debug, Serialize)]
pub struct LinkedEmailResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<Email> for LinkedEmailResponse {
    fn from(email: Email) -> Self {
        Self {
            id: email.id,
            email: email.email,
        }
    }
}

/// Contact response for API operations
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    pub surname: Option<String>,
    pub birthday: NaiveDate,
    pub description: Option<String>,
    pub emails: Vec<LinkedEmailResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            surname: contact.surname,
            birthday: contact.birthday,
            description: contact.description,
            emails: contact.emails.into_iter().map(Into::into).collect(),
            created_at: contact.created_at,
        }
    }
}

/// List the current user's contacts
///
/// **GET /api/contacts**
pub async fn list_contacts(
    AuthUser(user): AuthUser,
    Query(pagination): Query<Pagination>,
    State(state): State<DirectoryState>,
) -> Result<Json<Vec<ContactResponse>>> {
    let contacts = state
        .repos
        .contacts
        .list(user.id, pagination.offset(), Some(pagination.limit()))
        .await?;

    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

/// Get one contact by id
///
/// **GET /api/contacts/{id}**
pub async fn get_contact(
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
    State(state): State<DirectoryState>,
) -> Result<Json<ContactResponse>> {
    let contact = state
        .repos
        .contacts
        .get(user.id, contact_id)
        .await?
        .ok_or_else(|| Error::NotFound("Contact not found".to_string()))?;

    Ok(Json(contact.into()))
}

/// Create a contact
///
/// **POST /api/contacts**
pub async fn create_contact(
    AuthUser(user): AuthUser,
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let data: ContactData = request.into();
    let contact = state.repos.contacts.create(user.id, &data).await?;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// Replace a contact, including its full linked email set
///
/// **PUT /api/contacts/{id}**
pub async fn update_contact(
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<Json<ContactResponse>> {
    let data: ContactData = request.into();
    let contact = state
        .repos
        .contacts
        .update(user.id, contact_id, &data)
        .await?
        .ok_or_else(|| Error::NotFound("Contact not found".to_string()))?;

    Ok(Json(contact.into()))
}

/// Delete a contact; linked emails survive
///
/// **DELETE /api/contacts/{id}**
pub async fn delete_contact(
    AuthUser(user): AuthUser,
    Path(contact_id): Path<Uuid>,
    State(state): State<DirectoryState>,
) -> Result<Json<ContactResponse>> {
    let contact = state
        .repos
        .contacts
        .delete(user.id, contact_id)
        .await?
        .ok_or_else(|| Error::NotFound("Contact not found".to_string()))?;

    Ok(Json(contact.into()))
}
