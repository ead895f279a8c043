//! Rolodex avatar lookup service
//!
//! Resolves an optional avatar image URL for an email address, with
//! support for:
//! - Gravatar probing for production lookups
//! - Mock avatar service for testing and development
//!
//! Lookups are best-effort by contract: callers fold any error into
//! "absent" rather than failing the enclosing operation.

use thiserror::Error;

pub mod gravatar;
pub mod mock;

pub use gravatar::GravatarService;
pub use mock::MockAvatarService;

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Avatar configuration error: {0}")]
    Configuration(String),

    #[error("Avatar lookup request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Avatar lookup service
#[async_trait::async_trait]
pub trait AvatarService: Send + Sync + std::fmt::Debug {
    /// Look up an avatar URL for an email address.
    ///
    /// `Ok(None)` means the provider has no image for this address.
    async fn lookup(&self, email: &str) -> Result<Option<String>, AvatarError>;
}

/// Avatar service configuration
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    /// Avatar provider (gravatar, mock)
    pub provider: String,
    /// Base URL of the avatar provider
    pub base_url: String,
}

impl AvatarConfig {
    /// Create avatar config from environment variables
    pub fn from_env() -> Result<Self, AvatarError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("AVATAR_PROVIDER").unwrap_or_else(|_| "gravatar".to_string());
        let base_url = std::env::var("AVATAR_BASE_URL")
            .unwrap_or_else(|_| "https://www.gravatar.com".to_string());

        Ok(Self { provider, base_url })
    }
}

/// Factory for creating avatar services based on configuration
pub struct AvatarServiceFactory;

impl AvatarServiceFactory {
    /// Create an avatar service from configuration
    pub fn create(config: AvatarConfig) -> Result<Box<dyn AvatarService>, AvatarError> {
        match config.provider.as_str() {
            "gravatar" => Ok(Box::new(GravatarService::new(config.base_url))),
            "mock" => Ok(Box::new(MockAvatarService::new())),
            other => Err(AvatarError::Configuration(format!(
                "Unknown avatar provider: {}",
                other
            ))),
        }
    }
}
