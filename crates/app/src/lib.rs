//! Rolodex application composition root
//!
//! Wires repositories, the external-collaborator ports and the directory
//! router into a single application.

use std::sync::Arc;

use axum::Router;
use rolodex_auth::{AuthConfig, AuthServiceFactory};
use rolodex_avatar::{AvatarConfig, AvatarService, AvatarServiceFactory};
use rolodex_common::config::Config;
use rolodex_directory::{AccountService, DirectoryRepositories, DirectoryState};
use sqlx::PgPool;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    // Create repositories
    let repos = DirectoryRepositories::new(pool);

    // Create auth collaborator from environment
    let auth = AuthServiceFactory::create(AuthConfig {
        provider: config.auth_provider.clone(),
    })?;

    // Create avatar collaborator from environment
    let avatar_config = AvatarConfig {
        provider: config.avatar_provider.clone(),
        ..AvatarConfig::from_env()?
    };
    let avatars: Arc<dyn AvatarService> = Arc::from(AvatarServiceFactory::create(avatar_config)?);

    let accounts = AccountService::new(repos.users.clone(), avatars);

    // Create directory domain state
    let state = DirectoryState {
        repos,
        auth,
        accounts,
    };

    // Build router — compose domain routes with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Rolodex API v0.1.0" }))
        .merge(rolodex_directory::routes().with_state(state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
