//! Account lifecycle integration tests
//!
//! Registration (including avatar degradation), email confirmation,
//! refresh-token association and user cascade delete.
//! All tests require a provisioned Postgres (`DATABASE_URL`).

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use tower::ServiceExt;
use uuid::Uuid;

use rolodex_avatar::{AvatarService, MockAvatarService};
use rolodex_common::Error;
use rolodex_directory::{AccountService, ContactData, NewUser};

use crate::common::{api_request, body_json, TestApp, UserFixture};

fn new_user(email: &str) -> NewUser {
    NewUser {
        username: "testuser".to_string(),
        email: email.to_string(),
        password: "hashed:7".to_string(),
    }
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_register_with_avatar() {
    let app = TestApp::new().await.unwrap();
    let email = format!("reg-{}@example.com", Uuid::new_v4());

    let avatars: Arc<dyn AvatarService> =
        Arc::new(MockAvatarService::new().with_avatar(&email, "https://cdn.test/a.png"));
    let accounts = AccountService::new(app.repos.users.clone(), avatars);

    let user = accounts.register(&new_user(&email)).await.unwrap();
    app.track_user(user.id);

    assert_eq!(user.avatar.as_deref(), Some("https://cdn.test/a.png"));
    assert!(!user.confirmed);
    assert!(user.refresh_token.is_none());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_register_survives_avatar_lookup_failure() {
    let app = TestApp::new().await.unwrap();
    let email = format!("reg-{}@example.com", Uuid::new_v4());

    let avatars: Arc<dyn AvatarService> = Arc::new(MockAvatarService::failing());
    let accounts = AccountService::new(app.repos.users.clone(), avatars);

    // Lookup failure degrades to an absent avatar, never an error
    let user = accounts.register(&new_user(&email)).await.unwrap();
    app.track_user(user.id);
    assert!(user.avatar.is_none());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await.unwrap();
    let email = format!("dup-{}@example.com", Uuid::new_v4());

    let user = app.accounts.register(&new_user(&email)).await.unwrap();
    app.track_user(user.id);

    let err = app.accounts.register(&new_user(&email)).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_confirm_email_explicit_not_found_and_idempotent() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    // Unknown address is an explicit NotFound, never a silent no-op
    let err = app
        .accounts
        .confirm_email("nobody@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    app.accounts.confirm_email(&alice.user.email).await.unwrap();
    let confirmed = app
        .repos
        .users
        .get_by_email(&alice.user.email)
        .await
        .unwrap()
        .unwrap();
    assert!(confirmed.confirmed);

    // Confirming twice is a no-op success
    app.accounts.confirm_email(&alice.user.email).await.unwrap();

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_refresh_token_overwrite_and_revoke() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    app.accounts
        .update_refresh_token(alice.user.id, Some("refresh-1"))
        .await
        .unwrap();
    app.accounts
        .update_refresh_token(alice.user.id, Some("refresh-2"))
        .await
        .unwrap();

    // No rotation history: only the latest token survives
    let user = app
        .repos
        .users
        .get_by_id(alice.user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.refresh_token.as_deref(), Some("refresh-2"));

    app.accounts
        .update_refresh_token(alice.user.id, None)
        .await
        .unwrap();
    let user = app
        .repos
        .users
        .get_by_id(alice.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.refresh_token.is_none());

    // A deleted user is NotFound, not a silent success
    let err = app
        .accounts
        .update_refresh_token(Uuid::new_v4(), Some("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_user_delete_cascades_to_owned_rows() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    let email = app
        .repos
        .emails
        .create(alice.user.id, "a@x.com")
        .await
        .unwrap();
    app.repos
        .contacts
        .create(
            alice.user.id,
            &ContactData {
                name: "Jo".to_string(),
                surname: None,
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                description: None,
                email_ids: vec![email.id],
            },
        )
        .await
        .unwrap();

    app.repos.users.delete(alice.user.id).await.unwrap();

    let (contacts, emails): (i64, i64) = (
        sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE user_id = $1")
            .bind(alice.user.id)
            .fetch_one(&app.pool)
            .await
            .unwrap(),
        sqlx::query_scalar("SELECT COUNT(*) FROM emails WHERE user_id = $1")
            .bind(alice.user.id)
            .fetch_one(&app.pool)
            .await
            .unwrap(),
    );
    assert_eq!(contacts, 0);
    assert_eq!(emails, 0);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_signup_endpoint_hides_credentials() {
    let app = TestApp::new().await.unwrap();
    let email = format!("signup-{}@example.com", Uuid::new_v4());

    let response = app
        .test_router()
        .oneshot(api_request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(serde_json::json!({
                "username": "newuser",
                "email": email,
                "password": "plaintext-secret",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password").is_none());

    let user_id = Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();
    app.track_user(user_id);

    // The stored credential is the hash, not the plaintext
    let stored = app
        .repos
        .users
        .get_by_email(&email)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password, "plaintext-secret");

    // Duplicate signup answers 409
    let response = app
        .test_router()
        .oneshot(api_request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(serde_json::json!({
                "username": "newuser",
                "email": email,
                "password": "plaintext-secret",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_confirm_endpoint_flow() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    // The mock auth service issues `mock.<subject>` tokens
    let token = format!("mock.{}", alice.user.email);

    let response = app
        .test_router()
        .oneshot(api_request(
            Method::GET,
            &format!("/api/auth/confirm/{}", token),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let user = app
        .repos
        .users
        .get_by_email(&alice.user.email)
        .await
        .unwrap()
        .unwrap();
    assert!(user.confirmed);

    // A token for an unknown address maps to 404
    let response = app
        .test_router()
        .oneshot(api_request(
            Method::GET,
            "/api/auth/confirm/mock.nobody@example.com",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_logout_revokes_token_and_clears_refresh_token() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    app.accounts
        .update_refresh_token(alice.user.id, Some("refresh-1"))
        .await
        .unwrap();

    let response = app
        .test_router()
        .oneshot(api_request(
            Method::POST,
            "/api/auth/logout",
            Some(&alice.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user = app
        .repos
        .users
        .get_by_id(alice.user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.refresh_token.is_none());

    // The revoked credential no longer authenticates
    let response = app
        .test_router()
        .oneshot(api_request(
            Method::GET,
            "/api/contacts",
            Some(&alice.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.cleanup().await.unwrap();
}
