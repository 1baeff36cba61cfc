/// HTTP contract tests for the /users resource
/// Drives the full router over an in-memory store
mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::test_app;
use serde_json::{json, Value};
use tower::util::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, user) = send(app, Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_empty() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_defaults_role() {
    let app = test_app();

    let user = create(&app, json!({"name": "Jo", "email": "jo@example.com"})).await;

    assert_eq!(user["role"], "user");
    assert_eq!(user["name"], "Jo");
    assert!(user["id"].is_i64());
    assert!(user["phone"].is_null());
    assert_eq!(user["createdAt"], user["updatedAt"]);
}

#[tokio::test]
async fn test_create_rejects_short_name() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "J", "email": "jo@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name must be at least 2 characters"}));
}

#[tokio::test]
async fn test_create_rejects_bad_role() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Jo", "email": "jo@example.com", "role": "root"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Role"));
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_rejects_duplicate_email() {
    let app = test_app();
    create(&app, json!({"name": "Jo", "email": "jo@example.com"})).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Joanne", "email": "jo@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Email is already in use"}));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = test_app();
    let created = create(
        &app,
        json!({"name": "Ada", "email": "ada@example.com", "phone": "555-0100", "role": "admin"}),
    )
    .await;

    let uri = format!("/users/{}", created["id"]);
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_user() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/users/999999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = test_app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid user id"}));
    }

    let (status, _) = send(
        &app,
        Method::PUT,
        "/users/1x",
        Some(json!({"name": "Jo", "email": "jo@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = test_app();
    for (name, email) in [
        ("Ada", "ada@example.com"),
        ("Bob", "bob@example.com"),
        ("Cy", "cy@example.com"),
    ] {
        create(&app, json!({"name": name, "email": email})).await;
    }

    let (status, body) = send(&app, Method::GET, "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cy", "Bob", "Ada"]);
}

#[tokio::test]
async fn test_update_replaces_record() {
    let app = test_app();
    let created = create(&app, json!({"name": "Jo", "email": "jo@example.com", "phone": "1"})).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Joanna", "email": "joanna@example.com", "role": "moderator"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Joanna");
    assert_eq!(updated["role"], "moderator");
    // Full-record replacement: omitted phone is cleared.
    assert!(updated["phone"].is_null());
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_rejects_bad_email() {
    let app = test_app();
    create(&app, json!({"name": "Jo", "email": "jo@example.com"})).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(json!({"name": "Jo", "email": "bad-email", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_update_missing_user() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/42",
        Some(json!({"name": "Jo", "email": "jo@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn test_delete_user() {
    let app = test_app();
    let created = create(&app, json!({"name": "Jo", "email": "jo@example.com"})).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_is_consistent() {
    let app = test_app();

    let (first, first_body) = send(&app, Method::DELETE, "/users/7", None).await;
    let (second, second_body) = send(&app, Method::DELETE, "/users/7", None).await;

    assert_eq!(first, StatusCode::NOT_FOUND);
    assert_eq!(second, first);
    assert_eq!(second_body, first_body);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}

#[tokio::test]
async fn test_undecodable_id_is_rejected_as_json() {
    let app = test_app();

    for (method, body) in [
        (Method::GET, None),
        (
            Method::PUT,
            Some(json!({"name": "Jo", "email": "jo@example.com"})),
        ),
        (Method::DELETE, None),
    ] {
        let (status, response) = send(&app, method.clone(), "/users/%FF", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(response, json!({"error": "Invalid user id"}), "{method}");
    }
}

#[tokio::test]
async fn test_update_rejects_email_of_another_user() {
    let app = test_app();
    create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let bob = create(&app, json!({"name": "Bob", "email": "bob@example.com"})).await;
    let uri = format!("/users/{}", bob["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Bob", "email": "ada@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Email is already in use"}));

    let (_, unchanged) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(unchanged["email"], "bob@example.com");
}
