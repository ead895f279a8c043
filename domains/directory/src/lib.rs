//! Directory domain: users, contacts, emails, account lifecycle

pub mod accounts;
pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{ContactRepository, DirectoryRepositories, EmailRepository, UserRepository};

// Re-export lifecycle + API types
pub use accounts::AccountService;
pub use api::{routes, DirectoryState};

// Re-export auth types from rolodex-auth for convenience
pub use rolodex_auth::{
    AuthError, AuthPrincipal, AuthService, AuthUser, MockAuthService, SharedAuthService,
};
