//! Authentication boundary for the Rolodex API
//!
//! Password hashing and token issuance/validation live in an external auth
//! service. This crate defines the port consumed by the rest of the
//! application (`AuthService`), the resolved identity (`AuthPrincipal`),
//! a deterministic in-process mock for tests and local development, and
//! axum extractors that work with any domain state implementing
//! `FromRef<S>` for `Arc<dyn AuthService>`.

mod error;
mod extractors;
mod factory;
mod mock;
mod service;

pub use error::AuthError;
pub use extractors::AuthUser;
pub use factory::{AuthConfig, AuthServiceFactory};
pub use mock::MockAuthService;
pub use service::{AuthPrincipal, AuthService, SharedAuthService};
