//! Env-driven auth service selection
//!
//! The composition root picks the auth implementation from configuration
//! instead of hardwiring one, so local wiring and tests get the mock
//! explicitly and an external client can slot in without touching callers.

use std::sync::Arc;

use crate::error::AuthError;
use crate::mock::MockAuthService;
use crate::service::SharedAuthService;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Auth provider ("mock"; an external client registers its own name)
    pub provider: String,
}

impl AuthConfig {
    /// Create auth config from environment variables
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("AUTH_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        Ok(Self { provider })
    }
}

/// Factory for creating auth services based on configuration
pub struct AuthServiceFactory;

impl AuthServiceFactory {
    /// Create an auth service from configuration
    pub fn create(config: AuthConfig) -> Result<SharedAuthService, AuthError> {
        match config.provider.as_str() {
            "mock" => Ok(Arc::new(MockAuthService::new())),
            other => Err(AuthError::Configuration(format!(
                "Unknown auth provider: {}",
                other
            ))),
        }
    }
}
