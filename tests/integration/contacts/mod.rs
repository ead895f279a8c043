//! Contact repository and endpoint integration tests
//!
//! Covers the ownership-isolation invariants, the silent filtering of
//! foreign email ids, and full replacement of the linked email set.
//! All tests require a provisioned Postgres (`DATABASE_URL`).

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use tower::ServiceExt;
use uuid::Uuid;

use rolodex_directory::ContactData;

use crate::common::{api_request, body_json, contact_payload, TestApp, UserFixture};

fn contact_data(email_ids: Vec<Uuid>) -> ContactData {
    ContactData {
        name: "Jo".to_string(),
        surname: Some("Doe".to_string()),
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        description: Some("friend".to_string()),
        email_ids,
    }
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_create_contact_links_owned_email() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    let email = app
        .repos
        .emails
        .create(alice.user.id, "a@x.com")
        .await
        .unwrap();

    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![email.id]))
        .await
        .unwrap();

    assert_eq!(contact.name, "Jo");
    assert_eq!(contact.emails.len(), 1);
    assert_eq!(contact.emails[0].email, "a@x.com");
    assert_eq!(contact.user_id, alice.user.id);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_foreign_email_ids_silently_dropped_on_create() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();
    let bob = UserFixture::create(&app).await.unwrap();

    let own = app
        .repos
        .emails
        .create(alice.user.id, "mine@x.com")
        .await
        .unwrap();
    let foreign = app
        .repos
        .emails
        .create(bob.user.id, "theirs@x.com")
        .await
        .unwrap();
    let missing = Uuid::new_v4();

    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![own.id, foreign.id, missing]))
        .await
        .unwrap();

    // Only the owned id survives resolution; no error for the others
    assert_eq!(contact.emails.len(), 1);
    assert_eq!(contact.emails[0].id, own.id);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_contact_invisible_to_other_users() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();
    let bob = UserFixture::create(&app).await.unwrap();

    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![]))
        .await
        .unwrap();

    // Foreign-owned contact is indistinguishable from a missing one
    assert!(app
        .repos
        .contacts
        .get(bob.user.id, contact.id)
        .await
        .unwrap()
        .is_none());
    assert!(app
        .repos
        .contacts
        .list(bob.user.id, 0, None)
        .await
        .unwrap()
        .is_empty());

    // The owner still sees it
    assert!(app
        .repos
        .contacts
        .get(alice.user.id, contact.id)
        .await
        .unwrap()
        .is_some());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_cross_tenant_update_reads_as_not_found() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();
    let bob = UserFixture::create(&app).await.unwrap();

    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![]))
        .await
        .unwrap();

    let result = app
        .repos
        .contacts
        .update(bob.user.id, contact.id, &contact_data(vec![]))
        .await
        .unwrap();
    assert!(result.is_none());

    // The contact is untouched
    let unchanged = app
        .repos
        .contacts
        .get(alice.user.id, contact.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Jo");

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_update_replaces_full_email_set() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    let first = app
        .repos
        .emails
        .create(alice.user.id, "one@x.com")
        .await
        .unwrap();
    let second = app
        .repos
        .emails
        .create(alice.user.id, "two@x.com")
        .await
        .unwrap();

    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![first.id, second.id]))
        .await
        .unwrap();
    assert_eq!(contact.emails.len(), 2);

    // Replacement, not merge: an empty id list clears every link
    let updated = app
        .repos
        .contacts
        .update(alice.user.id, contact.id, &contact_data(vec![]))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.emails.is_empty());

    let reread = app
        .repos
        .contacts
        .get(alice.user.id, contact.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reread.emails.is_empty());

    // The emails themselves survive unlinking
    assert!(app
        .repos
        .emails
        .get(alice.user.id, first.id)
        .await
        .unwrap()
        .is_some());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_delete_returns_last_known_values_once() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    let email = app
        .repos
        .emails
        .create(alice.user.id, "a@x.com")
        .await
        .unwrap();
    let contact = app
        .repos
        .contacts
        .create(alice.user.id, &contact_data(vec![email.id]))
        .await
        .unwrap();

    let deleted = app
        .repos
        .contacts
        .delete(alice.user.id, contact.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.id, contact.id);
    assert_eq!(deleted.emails.len(), 1);

    // Gone for get, and a second delete is not-found rather than an error
    assert!(app
        .repos
        .contacts
        .get(alice.user.id, contact.id)
        .await
        .unwrap()
        .is_none());
    assert!(app
        .repos
        .contacts
        .delete(alice.user.id, contact.id)
        .await
        .unwrap()
        .is_none());

    // No cascade from contact to email
    assert!(app
        .repos
        .emails
        .get(alice.user.id, email.id)
        .await
        .unwrap()
        .is_some());

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_list_pagination_skip_take() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    for i in 0..5 {
        let mut data = contact_data(vec![]);
        data.name = format!("c{}", i);
        app.repos.contacts.create(alice.user.id, &data).await.unwrap();
    }

    let page = app
        .repos
        .contacts
        .list(alice.user.id, 1, Some(2))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "c1");
    assert_eq!(page[1].name, "c2");

    // Negative offset clamps to zero, absent limit is unbounded
    let all = app
        .repos
        .contacts
        .list(alice.user.id, -10, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].name, "c0");

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_contact_endpoints_scope_and_status_codes() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();
    let bob = UserFixture::create(&app).await.unwrap();

    let email = app
        .repos
        .emails
        .create(alice.user.id, "a@x.com")
        .await
        .unwrap();

    // Scenario: create via the API with one linked email
    let response = app
        .test_router()
        .oneshot(api_request(
            Method::POST,
            "/api/contacts",
            Some(&alice.token),
            Some(contact_payload(&[email.id])),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["emails"][0]["email"], "a@x.com");

    let contact_id = created["id"].as_str().unwrap().to_string();

    // Another user sees 404, not 403: no information leak
    let response = app
        .test_router()
        .oneshot(api_request(
            Method::GET,
            &format!("/api/contacts/{}", contact_id),
            Some(&bob.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // No credentials at all answers 401
    let response = app
        .test_router()
        .oneshot(api_request(Method::GET, "/api/contacts", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL - run against a provisioned Postgres
async fn test_contact_endpoint_rejects_future_birthday() {
    let app = TestApp::new().await.unwrap();
    let alice = UserFixture::create(&app).await.unwrap();

    let mut payload = contact_payload(&[]);
    payload["birthday"] = serde_json::json!("2999-01-01");

    let response = app
        .test_router()
        .oneshot(api_request(
            Method::POST,
            "/api/contacts",
            Some(&alice.token),
            Some(payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.cleanup().await.unwrap();
}
