mod common;

use std::sync::Arc;
use std::time::Duration;

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use finitive_server::api::app_router;
use finitive_server::auth::AuthConfig;
use finitive_server::AppState;
use rand::{rngs::OsRng, RngCore};
use serde_json::json;
use tower::ServiceExt;

fn auth_config(password: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string();

    let mut jwt_secret = [0u8; 32];
    OsRng.fill_bytes(&mut jwt_secret);

    AuthConfig {
        password_hash: Some(password_hash),
        jwt_secret: jwt_secret.to_vec(),
        access_token_ttl: Duration::from_secs(3600),
    }
}

fn build_authed_app(password: &str) -> (tempfile::TempDir, axum::Router, Arc<AppState>) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = common::test_config(&dir);
    config.auth = Some(auth_config(password));
    let state = common::build_test_state(
        &config,
        Arc::new(common::CannedProvider("[]".to_string())),
    );
    (dir, app_router(state.clone(), &config), state)
}

#[tokio::test]
async fn otp_request_without_identifier_is_rejected() {
    let (_dir, app, _state) = build_authed_app("hunter2!A");

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/callback")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn otp_request_with_email_issues_a_receipt() {
    let (_dir, app, _state) = build_authed_app("hunter2!A");

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/callback")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "sam@example.com", "mode": "magic-link"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["deliveredTo"], "sam@example.com");
    assert_eq!(body["data"]["mode"], "magic-link");
}

#[tokio::test]
async fn one_time_codes_exchange_exactly_once() {
    let (_dir, app, state) = build_authed_app("hunter2!A");
    let code = state.auth.as_ref().unwrap().begin_otp("sam@example.com");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/auth/callback?code={}", code))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/?accessToken="));

    // Codes are single-use: the second exchange lands on the bare root.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/auth/callback?code={}", code))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn exchanged_token_grants_access_to_protected_routes() {
    let (_dir, app, state) = build_authed_app("hunter2!A");

    // Unauthorized without a token.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/goals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let code = state.auth.as_ref().unwrap().begin_otp("sam@example.com");
    let token = state.auth.as_ref().unwrap().exchange_code(&code).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/goals")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn password_login_issues_a_working_token() {
    let password = "super-secret";
    let (_dir, app, _state) = build_authed_app(password);

    // Auth status reflects the configured password.
    let status_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status_response.status(), 200);
    let status_bytes = to_bytes(status_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let status_json: serde_json::Value = serde_json::from_slice(&status_bytes).unwrap();
    assert_eq!(status_json["requiresPassword"], true);

    // Wrong password is rejected.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"password": "nope"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Login with the correct password.
    let login_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "password": password }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login_response.status(), 200);
    let login_bytes = to_bytes(login_response.into_body(), usize::MAX)
        .await
        .unwrap();
    let login_json: serde_json::Value = serde_json::from_slice(&login_bytes).unwrap();
    let token = login_json["accessToken"].as_str().unwrap();

    // Access with token succeeds.
    let authed_response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/tasks")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(authed_response.status(), 200);
}

#[tokio::test]
async fn open_mode_skips_the_jwt_gate() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&dir);
    let state = common::build_test_state(
        &config,
        Arc::new(common::CannedProvider("[]".to_string())),
    );
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/goals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
