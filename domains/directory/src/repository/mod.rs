//! Repository implementations for the directory domain

pub mod contacts;
pub mod emails;
pub mod users;

use sqlx::PgPool;

pub use contacts::ContactRepository;
pub use emails::EmailRepository;
pub use users::UserRepository;

/// Combined repository access for the directory domain
#[derive(Clone)]
pub struct DirectoryRepositories {
    pub contacts: ContactRepository,
    pub emails: EmailRepository,
    pub users: UserRepository,
}

impl DirectoryRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            contacts: ContactRepository::new(pool.clone()),
            emails: EmailRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
