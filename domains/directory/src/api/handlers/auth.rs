//! Account lifecycle API handlers
//!
//! Signup, email confirmation and logout. Password hashing and token
//! issuance/validation happen in the external auth service; these
//! handlers only orchestrate it with the account lifecycle service.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use rolodex_auth::AuthUser;
use rolodex_common::{Error, Result, ValidatedJson};

use crate::api::middleware::DirectoryState;
use crate::domain::entities::{NewUser, User};

/// Request body for account registration
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(email, length(max = 150))]
    pub email: String,

    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub confirmed: bool,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            confirmed: user.confirmed,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserProfile,
    pub detail: String,
}

/// Register a new account; a duplicate email answers 409
///
/// **POST /api/auth/signup**
pub async fn signup(
    State(state): State<DirectoryState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let password = state
        .auth
        .hash_credential(&request.password)
        .await
        .map_err(|_| Error::Internal("Credential hashing unavailable".to_string()))?;

    let new_user = NewUser {
        username: request.username,
        email: request.email,
        password,
    };

    let user = state.accounts.register(&new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: user.into(),
            detail: "User successfully created".to_string(),
        }),
    ))
}

/// Confirm the account behind a confirmation token
///
/// **GET /api/auth/confirm/{token}**
pub async fn confirm_email(
    Path(token): Path<String>,
    State(state): State<DirectoryState>,
) -> Result<Json<serde_json::Value>> {
    let email = state
        .auth
        .verify_token(&token)
        .await
        .map_err(|_| Error::Authentication("Invalid confirmation token".to_string()))?;

    state.accounts.confirm_email(&email).await?;

    Ok(Json(json!({ "message": "Email confirmed" })))
}

/// Revoke the current credential token and drop the stored refresh token
///
/// **POST /api/auth/logout**
pub async fn logout(
    AuthUser(user): AuthUser,
    headers: HeaderMap,
    State(state): State<DirectoryState>,
) -> Result<StatusCode> {
    // AuthUser already proved the header is present and well-formed
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Authentication("Missing bearer token".to_string()))?;

    state
        .auth
        .revoke_token(token)
        .await
        .map_err(|_| Error::Internal("Token revocation unavailable".to_string()))?;

    state.accounts.update_refresh_token(user.id, None).await?;

    Ok(StatusCode::NO_CONTENT)
}
