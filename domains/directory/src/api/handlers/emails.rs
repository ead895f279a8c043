//! Email API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rolodex_auth::AuthUser;
use rolodex_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::DirectoryState;
use crate::domain::entities::Email;

/// Request body for creating or replacing an email entry
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email, length(max = 100))]
    pub email: String,
}

/// Email response for API operations
#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Email> for EmailResponse {
    fn from(email: Email) -> Self {
        Self {
            id: email.id,
            email: email.email,
            created_at: email.created_at,
        }
    }
}

/// List the current user's emails
///
/// **GET /api/emails**
pub async fn list_emails(
    AuthUser(user): AuthUser,
    Query(pagination): Query<Pagination>,
    State(state): State<DirectoryState>,
) -> Result<Json<Vec<EmailResponse>>> {
    let emails = state
        .repos
        .emails
        .list(user.id, pagination.offset(), Some(pagination.limit()))
        .await?;

    Ok(Json(emails.into_iter().map(Into::into).collect()))
}

/// Get one email by id
///
/// **GET /api/emails/{id}**
pub async fn get_email(
    AuthUser(user): AuthUser,
    Path(email_id): Path<Uuid>,
    State(state): State<DirectoryState>,
) -> Result<Json<EmailResponse>> {
    let email = state
        .repos
        .emails
        .get(user.id, email_id)
        .await?
        .ok_or_else(|| Error::NotFound("Email not found".to_string()))?;

    Ok(Json(email.into()))
}

/// Create an email entry; a duplicate address for this user answers 409
///
/// **POST /api/emails**
pub async fn create_email(
    AuthUser(user): AuthUser,
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> Result<(StatusCode, Json<EmailResponse>)> {
    let email = state.repos.emails.create(user.id, &request.email).await?;

    Ok((StatusCode::CREATED, Json(email.into())))
}

/// Replace the address of an email entry
///
/// **PUT /api/emails/{id}**
pub async fn update_email(
    AuthUser(user): AuthUser,
    Path(email_id): Path<Uuid>,
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> Result<Json<EmailResponse>> {
    let email = state
        .repos
        .emails
        .update(user.id, email_id, &request.email)
        .await?
        .ok_or_else(|| Error::NotFound("Email not found".to_string()))?;

    Ok(Json(email.into()))
}

/// Delete an email entry
///
/// **DELETE /api/emails/{id}**
pub async fn delete_email(
    AuthUser(user): AuthUser,
    Path(email_id): Path<Uuid>,
    State(state): State<DirectoryState>,
) -> Result<Json<EmailResponse>> {
    let email = state
        .repos
        .emails
        .delete(user.id, email_id)
        .await?
        .ok_or_else(|| Error::NotFound("Email not found".to_string()))?;

    Ok(Json(email.into()))
}
