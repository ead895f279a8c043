//! Account lifecycle for the directory domain
//!
//! Registration, email confirmation and refresh-token association.
//! Avatar lookup is best-effort: any collaborator failure degrades to an
//! absent avatar and never aborts registration.

use std::sync::Arc;

use rolodex_avatar::AvatarService;
use rolodex_common::Result;
use uuid::Uuid;

use crate::domain::entities::{NewUser, User};
use crate::repository::UserRepository;

/// Account lifecycle service
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
    avatars: Arc<dyn AvatarService>,
}

impl AccountService {
    pub fn new(users: UserRepository, avatars: Arc<dyn AvatarService>) -> Self {
        Self { users, avatars }
    }

    /// Register a new user.
    ///
    /// `new_user.password` must already be a credential hash; this
    /// component never hashes. A duplicate account email surfaces as a
    /// conflict from the storage boundary.
    pub async fn register(&self, new_user: &NewUser) -> Result<User> {
        new_user.validate()?;

        let avatar = match self.avatars.lookup(&new_user.email).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, email = %new_user.email,
                    "Avatar lookup failed, registering without avatar");
                None
            }
        };

        self.users.create(new_user, avatar.as_deref()).await
    }

    /// Overwrite the stored refresh token; `None` revokes
    pub async fn update_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()> {
        self.users.update_refresh_token(user_id, token).await
    }

    /// Confirm the account behind an email address.
    ///
    /// Unknown addresses fail with `NotFound`; confirming twice is a
    /// no-op success.
    pub async fn confirm_email(&self, email: &str) -> Result<()> {
        self.users.confirm_email(email).await
    }
}
