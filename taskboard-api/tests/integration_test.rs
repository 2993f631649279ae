/// Integration tests for the Taskboard API
///
/// These tests drive the full router (auth middleware, handlers, error
/// mapping) over an in-memory store:
/// - Signup/login and token lifetimes
/// - Per-owner task CRUD and ownership enforcement
/// - Error classification on the wire

mod common;

use axum::http::StatusCode;
use common::{TestContext, TEST_SECRET};
use serde_json::json;
use taskboard_shared::auth::jwt::TokenService;
use uuid::Uuid;

fn token_ttl_seconds(token: &str) -> i64 {
    let claims = TokenService::new(TEST_SECRET).unwrap().decode(token).unwrap();
    claims.exp - claims.iat
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["database"], "connected");
    assert!(response.body["version"].is_string());
}

/// Ann signs up, logs in, creates a task; Bob cannot complete it
#[tokio::test]
async fn test_ann_scenario() {
    let ctx = TestContext::new();

    // Signup: 1 hour token
    let signup = ctx
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(signup.status, StatusCode::CREATED);
    assert_eq!(signup.body["user"]["name"], "Ann");
    assert_eq!(signup.body["user"]["email"], "ann@x.com");
    assert!(signup.body["user"].get("password_hash").is_none());
    assert_eq!(token_ttl_seconds(signup.body["token"].as_str().unwrap()), 3600);

    // Login: 24 hour token
    let login = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@x.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["id"], signup.body["user"]["id"]);
    let ann_token = login.body["token"].as_str().unwrap().to_string();
    assert_eq!(token_ttl_seconds(&ann_token), 24 * 3600);

    // Create
    let created = ctx
        .request(
            "POST",
            "/api/tasks",
            Some(&ann_token),
            Some(json!({ "title": "Buy milk" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["title"], "Buy milk");
    assert_eq!(created.body["status"], "pending");
    assert_eq!(created.body["user_id"], signup.body["user"]["id"]);
    let task_id = created.body["id"].as_str().unwrap().to_string();

    // Another user tries to complete it
    let bob = ctx.signup("Bob", "bob@x.com", "secret2").await;
    let rejected = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", task_id),
            Some(&bob.token),
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.body["error"], "forbidden");

    // Ann still sees it pending
    let list = ctx.request("GET", "/api/tasks", Some(&ann_token), None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().unwrap().len(), 1);
    assert_eq!(list.body[0]["id"], task_id.as_str());
    assert_eq!(list.body[0]["status"], "pending");
}

#[tokio::test]
async fn test_duplicate_signup_is_conflict() {
    let ctx = TestContext::new();
    ctx.signup("Ann", "ann@x.com", "secret1").await;

    let response = ctx
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Other Ann", "email": "ann@x.com", "password": "another" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "conflict");
    assert_eq!(ctx.store.user_count().await, 1);
}

#[tokio::test]
async fn test_signup_requires_every_field() {
    let ctx = TestContext::new();

    let response = ctx
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "name": "", "email": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "validation_error");
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name", "password"]);
    assert_eq!(ctx.store.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_accepts_short_password() {
    let ctx = TestContext::new();

    let response = ctx
        .request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "abc" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(ctx.store.user_count().await, 1);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .request("POST", "/api/auth/login", None, Some(json!("just a string")))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "bad_request");
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let ctx = TestContext::new();
    ctx.signup("Ann", "ann@x.com", "secret1").await;

    let wrong_password = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@x.com", "password": "wrong1" })),
        )
        .await;
    let unknown_user = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@x.com", "password": "secret1" })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body["message"], "Invalid Credentials");
}

#[tokio::test]
async fn test_odd_login_input_gets_same_failure() {
    let ctx = TestContext::new();
    ctx.signup("Ann", "ann@x.com", "secret1").await;

    let baseline = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "bob@x.com", "password": "x" })),
        )
        .await;

    for body in [
        json!({ "email": "bob", "password": "x" }),
        json!({ "email": "ann@x.com", "password": "" }),
        json!({ "email": "", "password": "" }),
        json!({}),
    ] {
        let response = ctx
            .request("POST", "/api/auth/login", None, Some(body.clone()))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response.body, baseline.body, "{}", body);
    }
    assert_eq!(baseline.body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_email_is_case_sensitive() {
    let ctx = TestContext::new();
    ctx.signup("Ann", "ann@x.com", "secret1").await;

    let response = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ANN@x.com", "password": "secret1" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new();

    let missing = ctx.request("GET", "/api/tasks", None, None).await;
    let garbage = ctx.request("GET", "/api/tasks", Some("not.a.token"), None).await;

    let foreign = TokenService::new("some-other-secret-of-sufficient-length")
        .unwrap()
        .issue(Uuid::new_v4(), chrono_hours(1))
        .unwrap();
    let wrong_key = ctx.request("GET", "/api/tasks", Some(&foreign), None).await;

    for response in [&missing, &garbage, &wrong_key] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(missing.body, garbage.body);
    assert_eq!(missing.body, wrong_key.body);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    let expired = TokenService::new(TEST_SECRET)
        .unwrap()
        .issue(ann.id.parse().unwrap(), chrono_hours(-1))
        .unwrap();

    let response = ctx.request("GET", "/api/tasks", Some(&expired), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    let profile = ctx
        .request("GET", "/api/user/profile", Some(&ann.token), None)
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["id"], ann.id.as_str());
    assert_eq!(profile.body["name"], "Ann");
    assert!(profile.body.get("password_hash").is_none());

    let renamed = ctx
        .request(
            "GET",
            "/api/user/profile",
            Some(&ann.token),
            Some(json!({ "name": "Annie" })),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["name"], "Annie");

    let via_put = ctx
        .request(
            "PUT",
            "/api/user/profile",
            Some(&ann.token),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(via_put.body["name"], "Annie");
}

#[tokio::test]
async fn test_profile_of_unknown_user() {
    let ctx = TestContext::new();
    let ghost = TokenService::new(TEST_SECRET)
        .unwrap()
        .issue(Uuid::new_v4(), chrono_hours(1))
        .unwrap();

    let response = ctx.request("GET", "/api/user/profile", Some(&ghost), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_task_requires_title() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    for body in [json!({}), json!({ "title": "" }), json!({ "title": "   " })] {
        let response = ctx
            .request("POST", "/api/tasks", Some(&ann.token), Some(body))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "validation_error");
    }

    assert_eq!(ctx.store.task_count().await, 0);
}

#[tokio::test]
async fn test_list_newest_first_and_scoped() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let bob = ctx.signup("Bob", "bob@x.com", "secret2").await;

    ctx.create_task(&ann, "first").await;
    ctx.create_task(&bob, "bob's").await;
    ctx.create_task(&ann, "second").await;
    ctx.create_task(&ann, "third").await;

    let list = ctx.request("GET", "/api/tasks", Some(&ann.token), None).await;
    let titles: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);

    let list = ctx.request("GET", "/api/tasks", Some(&bob.token), None).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_applies_only_provided_fields() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    let created = ctx
        .request(
            "POST",
            "/api/tasks",
            Some(&ann.token),
            Some(json!({ "title": "Buy milk", "description": "2 litres" })),
        )
        .await;
    let id = created.body["id"].as_str().unwrap();

    let updated = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", id),
            Some(&ann.token),
            Some(json!({ "status": "in-progress" })),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "in-progress");
    assert_eq!(updated.body["title"], "Buy milk");
    assert_eq!(updated.body["description"], "2 litres");
    assert_eq!(updated.body["created_at"], created.body["created_at"]);
}

#[tokio::test]
async fn test_invalid_status_rejected() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let task = ctx.create_task(&ann, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    let response = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", id),
            Some(&ann.token),
            Some(json!({ "status": "done" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"][0]["field"], "status");

    let list = ctx.request("GET", "/api/tasks", Some(&ann.token), None).await;
    assert_eq!(list.body[0]["status"], "pending");
}

#[tokio::test]
async fn test_invalid_status_on_missing_task_is_not_found() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    let response = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", Uuid::new_v4()),
            Some(&ann.token),
            Some(json!({ "status": "done" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not_found");
}

#[tokio::test]
async fn test_invalid_status_on_foreign_task_is_forbidden() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let bob = ctx.signup("Bob", "bob@x.com", "secret2").await;
    let task = ctx.create_task(&ann, "Buy milk").await;

    let response = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
            Some(&bob.token),
            Some(json!({ "status": "done", "title": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "forbidden");
}

#[tokio::test]
async fn test_long_title_accepted() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let title = "t".repeat(1000);

    let task = ctx.create_task(&ann, &title).await;

    assert_eq!(task["title"], title);
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let bob = ctx.signup("Bob", "bob@x.com", "secret2").await;
    let task = ctx.create_task(&ann, "Buy milk").await;
    let id = task["id"].as_str().unwrap();

    let response = ctx
        .request("DELETE", &format!("/api/tasks/{}", id), Some(&bob.token), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "forbidden");
    assert_eq!(ctx.store.task_count().await, 1);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;
    let task = ctx.create_task(&ann, "Buy milk").await;
    let uri = format!("/api/tasks/{}", task["id"].as_str().unwrap());

    let first = ctx.request("DELETE", &uri, Some(&ann.token), None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["msg"], "Task removed");

    let second = ctx.request("DELETE", &uri, Some(&ann.token), None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_task_ids() {
    let ctx = TestContext::new();
    let ann = ctx.signup("Ann", "ann@x.com", "secret1").await;

    let missing = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", Uuid::new_v4()),
            Some(&ann.token),
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let not_a_uuid = ctx
        .request("DELETE", "/api/tasks/12345", Some(&ann.token), None)
        .await;
    assert_eq!(not_a_uuid.status, StatusCode::NOT_FOUND);
}

fn chrono_hours(hours: i64) -> chrono::Duration {
    chrono::Duration::hours(hours)
}
