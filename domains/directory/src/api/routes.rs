//! Route definitions for the directory domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, contacts, emails};
use super::middleware::DirectoryState;

/// Create contact management routes
fn contact_routes() -> Router<DirectoryState> {
    Router::new()
        .route(
            "/api/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/api/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
}

/// Create email management routes
fn email_routes() -> Router<DirectoryState> {
    Router::new()
        .route(
            "/api/emails",
            get(emails::list_emails).post(emails::create_email),
        )
        .route(
            "/api/emails/{id}",
            get(emails::get_email)
                .put(emails::update_email)
                .delete(emails::delete_email),
        )
}

/// Create account lifecycle routes
fn auth_routes() -> Router<DirectoryState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/confirm/{token}", get(auth::confirm_email))
        .route("/api/auth/logout", post(auth::logout))
}

/// Create all directory domain API routes
pub fn routes() -> Router<DirectoryState> {
    Router::new()
        .merge(contact_routes())
        .merge(email_routes())
        .merge(auth_routes())
}
