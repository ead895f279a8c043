//! Mock auth service implementation
//!
//! Deterministic in-process stand-in for the external auth service, used
//! by tests and local development. Tokens are `mock.<subject>` strings;
//! principals are registered explicitly by fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::AuthError;
use crate::service::{AuthPrincipal, AuthService};

const MOCK_TOKEN_PREFIX: &str = "mock.";

/// Mock auth service for testing
#[derive(Debug, Default)]
pub struct MockAuthService {
    principals: RwLock<HashMap<String, AuthPrincipal>>,
    revoked: RwLock<HashSet<String>>,
}

impl MockAuthService {
    /// Create a new mock auth service with no registered principals
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a principal and return the credential token resolving to it
    pub fn register_principal(&self, principal: AuthPrincipal) -> String {
        let token = format!("{}{}", MOCK_TOKEN_PREFIX, principal.id);
        self.principals
            .write()
            .expect("mock auth lock poisoned")
            .insert(token.clone(), principal);
        token
    }
}

#[async_trait::async_trait]
impl AuthService for MockAuthService {
    async fn resolve_current_user(
        &self,
        credential_token: &str,
    ) -> Result<AuthPrincipal, AuthError> {
        if self
            .revoked
            .read()
            .expect("mock auth lock poisoned")
            .contains(credential_token)
        {
            return Err(AuthError::RevokedToken);
        }
        self.principals
            .read()
            .expect("mock auth lock poisoned")
            .get(credential_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    async fn issue_token(&self, subject: &str) -> Result<String, AuthError> {
        Ok(format!("{}{}", MOCK_TOKEN_PREFIX, subject))
    }

    async fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        if self
            .revoked
            .read()
            .expect("mock auth lock poisoned")
            .contains(token)
        {
            return Err(AuthError::RevokedToken);
        }
        token
            .strip_prefix(MOCK_TOKEN_PREFIX)
            .map(str::to_string)
            .ok_or(AuthError::InvalidToken)
    }

    async fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        self.revoked
            .write()
            .expect("mock auth lock poisoned")
            .insert(token.to_string());
        Ok(())
    }

    async fn hash_credential(&self, raw: &str) -> Result<String, AuthError> {
        // Opaque but stable, so tests can assert plaintext never lands in storage
        Ok(format!("hashed:{}", raw.len()))
    }
}
