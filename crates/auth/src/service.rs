//! The auth collaborator port
//!
//! Lightweight view of the same user row owned by the directory domain.
//! Carries only the fields needed for authentication decisions; handlers
//! needing full `User` data load from the directory repository.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AuthError;

/// Lightweight identity for authenticated users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthPrincipal {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub confirmed: bool,
}

/// Port to the external authentication service.
///
/// The concrete implementation (password verification, JWT issuance and
/// validation, token storage) runs out of process; this trait is the
/// boundary the Rolodex API consumes. `MockAuthService` provides an
/// in-process implementation for tests.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync + std::fmt::Debug {
    /// Resolve the user identity behind a credential token.
    async fn resolve_current_user(&self, credential_token: &str)
        -> Result<AuthPrincipal, AuthError>;

    /// Issue an opaque token for a subject (an email address for
    /// confirmation links, a user id for sessions).
    async fn issue_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Verify a token and return its subject.
    async fn verify_token(&self, token: &str) -> Result<String, AuthError>;

    /// Revoke a previously issued token.
    async fn revoke_token(&self, token: &str) -> Result<(), AuthError>;

    /// Hash a raw credential. The directory domain only ever stores the
    /// opaque hash produced here, never the plaintext.
    async fn hash_credential(&self, raw: &str) -> Result<String, AuthError>;
}

/// Shared handle to the auth collaborator, as held in domain state.
pub type SharedAuthService = Arc<dyn AuthService>;
