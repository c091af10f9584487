// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and session tests through the HTTP router.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use holiday_planner::db::{MemoryStore, Storage};
use holiday_planner::models::User;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, get_request, json_request, login_response, register};

#[tokio::test]
async fn test_register_login_me_scenario() {
    let (app, _) = create_test_app();

    let created = register(&app, "alice@example.com", "password123").await;
    assert_eq!(created["email"], "alice@example.com");
    assert!(created.get("hashed_password").is_none());
    assert!(!created["id"].as_str().unwrap().is_empty());

    let response = login_response(&app, "alice@example.com", "password123").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/auth/me", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], "alice@example.com");
    assert_eq!(me["id"], created["id"]);
    assert!(me.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (app, _) = create_test_app();
    register(&app, "alice@example.com", "password123").await;

    let body = json!({"email": "Alice@Example.com", "name": "Again", "password": "password456"});
    let response = app
        .oneshot(json_request("POST", "/auth/register", None, &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"], "Email already registered");
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _) = create_test_app();

    for body in [
        json!({"email": "not-an-email", "name": "A", "password": "password123"}),
        json!({"email": "a@example.com", "name": "A", "password": "short"}),
        json!({"email": "a@example.com", "name": "  ", "password": "password123"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", None, &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

#[tokio::test]
async fn test_bad_credentials_get_challenge() {
    let (app, _) = create_test_app();
    register(&app, "alice@example.com", "password123").await;

    for (username, password) in [
        ("alice@example.com", "wrong-password"),
        ("nobody@example.com", "password123"),
    ] {
        let response = login_response(&app, username, password).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body = body_json(response).await;
        assert_eq!(body["details"], "Incorrect email or password");
    }
}

#[tokio::test]
async fn test_login_sets_strict_session_cookie() {
    let (app, _) = create_test_app();
    register(&app, "alice@example.com", "password123").await;

    let response = login_response(&app, "alice@example.com", "password123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("holiday_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));

    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    let cookie_pair = set_cookie.split(';').next().unwrap();
    assert_eq!(cookie_pair, format!("holiday_token={}", token));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "alice@example.com");
}

#[tokio::test]
async fn test_failed_login_sets_no_cookie() {
    let (app, _) = create_test_app();
    register(&app, "alice@example.com", "password123").await;

    let response = login_response(&app, "alice@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_inactive_user_rejected() {
    let store = Arc::new(MemoryStore::new());
    let (app, state) = common::create_test_app_with(common::test_config(), store.clone());

    store
        .insert_user(User {
            id: String::new(),
            email: "dormant@example.com".to_string(),
            name: "Dormant".to_string(),
            hashed_password: "unused".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
            is_active: false,
        })
        .await
        .unwrap();
    let token = state.accounts.tokens().issue("dormant@example.com").unwrap();

    let response = app
        .oneshot(get_request("/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "inactive_user");
}
