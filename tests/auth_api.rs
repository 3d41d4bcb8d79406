//! Integration tests for owner login and the token-refresh endpoint.

mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestSite, body_json, get_auth, login_tokens, post_json};
use personalsite::presentation::http::auth::{
    TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH, issue_token,
};

#[tokio::test]
async fn login_returns_a_token_pair() {
    let site = TestSite::new();
    let (refresh, access) = login_tokens(&site).await;
    assert!(!refresh.is_empty());
    assert!(!access.is_empty());

    let resp = get_auth(site.app(true), "/api/users/me", &access).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["username"], "admin");
    assert_eq!(json["email"], "owner@example.com");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let site = TestSite::new();

    let resp = post_json(
        site.app(true),
        "/api/users/login",
        serde_json::json!({ "username": "admin", "password": "wrong" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_json(
        site.app(true),
        "/api/users/login",
        serde_json::json!({ "username": "intruder", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let site = TestSite::new();
    let (refresh, _) = login_tokens(&site).await;

    let resp = post_json(
        site.app(true),
        "/api/token/refresh",
        serde_json::json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let access = body_json(resp).await["access"].as_str().unwrap().to_string();

    let resp = get_auth(site.app(true), "/api/users/me", &access).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn access_token_is_not_accepted_as_refresh_token() {
    let site = TestSite::new();
    let (_, access) = login_tokens(&site).await;

    let resp = post_json(
        site.app(true),
        "/api/token/refresh",
        serde_json::json!({ "refresh": access }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_accepted_as_bearer() {
    let site = TestSite::new();
    let (refresh, _) = login_tokens(&site).await;

    let resp = get_auth(site.app(true), "/api/users/me", &refresh).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_refresh_token_is_rejected() {
    let site = TestSite::new();
    let cfg = site.config(true);
    let expired = issue_token(&cfg, "admin", TOKEN_TYPE_REFRESH, -7200).unwrap();

    let resp = post_json(
        site.app(true),
        "/api/token/refresh",
        serde_json::json!({ "refresh": expired }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let site = TestSite::new();
    let cfg = site.config(true);

    let resp = post_json(
        site.app(true),
        "/api/token/refresh",
        serde_json::json!({ "refresh": "not-a-jwt" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A token signed for the right type but by a different secret.
    let mut other = cfg.clone();
    other.jwt_secret = "a-completely-different-secret".into();
    let forged = issue_token(&other, "admin", TOKEN_TYPE_ACCESS, 3600).unwrap();
    let resp = get_auth(site.app(true), "/api/users/me", &forged).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
