//! API layer for the directory domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::DirectoryState;
pub use routes::routes;
