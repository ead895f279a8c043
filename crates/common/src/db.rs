//! Storage-boundary error taxonomy
//!
//! Repositories speak `RepositoryError`; the conversion into the
//! application `Error` decides how each case reaches API callers.

use crate::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error(transparent)]
    Connection(#[from] sqlx::Error),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
        }
    }
}
