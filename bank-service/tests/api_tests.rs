mod common;

use auth::Clock;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"], "ok");
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let user = app.register("alice@example.com", "pw1").await;
    let data = &user.body["data"];

    assert_eq!(user.body["status_code"], 201);
    assert_eq!(user.user_id.len(), 8);
    assert!(user
        .user_id
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(data["accountNumber"].as_str().unwrap().starts_with("AC"));
    assert_eq!(data["accountNumber"].as_str().unwrap().len(), 12);
    assert!(data["routingCode"].as_str().unwrap().starts_with("IFSC"));
    assert_eq!(data["pin"].as_str().unwrap().len(), 6);
    assert_eq!(data["firstName"], "Alice");
    assert_eq!(data["lastName"], "Smith");
    assert_eq!(data["email"], "alice@example.com");
    assert_eq!(data["balance"], 0);
    assert!(data["createdAt"].is_string());
    assert!(data.get("password").is_none());
    assert!(data.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pw1").await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "firstName": "Other",
            "lastName": "Person",
            "email": "alice@example.com",
            "password": "pw2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_differing_in_case() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "pw1").await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "firstName": "Other",
            "lastName": "Person",
            "email": "Alice@Example.COM",
            "password": "pw2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/user/register")
        .json(&json!({
            "firstName": "Alice",
            "lastName": "Smith",
            "email": "not-an-email",
            "password": "pw1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid email"));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_empty_names_and_password() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "firstName": " ", "lastName": "Smith", "email": "a@example.com", "password": "pw1" }),
        json!({ "firstName": "Alice", "lastName": "", "email": "a@example.com", "password": "pw1" }),
        json!({ "firstName": "Alice", "lastName": "Smith", "email": "a@example.com", "password": "" }),
    ] {
        let response = app
            .post("/api/user/register")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;

    let response = app.login(&user.user_id, "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let bearer = body["data"].as_str().unwrap();
    assert!(bearer.starts_with("Bearer "));
    assert_eq!(bearer.trim_start_matches("Bearer ").split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;

    let wrong_password = app.login(&user.user_id, "pw2").await;
    let unknown_user = app.login("ZZZZZZZZ", "pw1").await;
    let unparsable_user = app.login("not a user", "pw1").await;

    let mut bodies = Vec::new();
    for response in [wrong_password, unknown_user, unparsable_user] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert_eq!(bodies[0]["data"]["message"], "Invalid credentials");
    assert!(bodies.iter().all(|body| body == &bodies[0]));
}

#[tokio::test]
async fn test_details_with_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;
    let bearer = app.bearer_for(&user).await;

    let response = app
        .get_authorized("/api/user/details", &bearer)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["userId"], user.user_id.as_str());
    assert_eq!(body["data"]["email"], user.email.as_str());
    assert_eq!(
        body["data"]["accountNumber"],
        user.body["data"]["accountNumber"]
    );
    assert_eq!(body["data"]["balance"], 0);
    assert!(body["data"].get("pin").is_none());
}

#[tokio::test]
async fn test_details_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/user/details")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Unauthorized");
}

#[tokio::test]
async fn test_details_with_expired_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;
    let bearer = app.bearer_for(&user).await;

    app.clock.advance(Duration::hours(24) - Duration::seconds(1));
    let response = app
        .get_authorized("/api/user/details", &bearer)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let response = app
        .get_authorized("/api/user/details", &bearer)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_details_with_tampered_token() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;
    let bearer = app.bearer_for(&user).await;

    // Replace one character in the middle of the signature segment.
    let mut segments: Vec<String> = bearer
        .trim_start_matches("Bearer ")
        .split('.')
        .map(str::to_string)
        .collect();
    let signature = &mut segments[2];
    let replacement = if signature.as_bytes()[10] == b'A' { "B" } else { "A" };
    signature.replace_range(10..11, replacement);
    let tampered = format!("Bearer {}", segments.join("."));

    let response = app
        .get_authorized("/api/user/details", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_other_service_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app.register("alice@example.com", "pw1").await;

    let foreign_key = auth::SigningKey::new("another-secret-key-for-jwt-signing-32-bytes").unwrap();
    let (token, _) = auth::JwtHandler::new(&foreign_key, Duration::hours(1))
        .issue(&user.user_id, app.clock.now())
        .unwrap();

    let response = app
        .get_authorized("/api/user/details", &format!("Bearer {token}"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_ignore_bad_tokens() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authorized("/health", "Bearer garbage")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
