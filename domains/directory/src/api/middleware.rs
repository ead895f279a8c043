//! Directory domain state and auth collaborator integration

use axum::extract::FromRef;
use rolodex_auth::SharedAuthService;

use crate::accounts::AccountService;
use crate::repository::DirectoryRepositories;

/// Application state for the directory domain
#[derive(Clone)]
pub struct DirectoryState {
    pub repos: DirectoryRepositories,
    pub auth: SharedAuthService,
    pub accounts: AccountService,
}

impl FromRef<DirectoryState> for SharedAuthService {
    fn from_ref(state: &DirectoryState) -> Self {
        state.auth.clone()
    }
}
