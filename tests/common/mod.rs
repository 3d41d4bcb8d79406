//! Shared fixtures: a temp-dir site layout (media tree + SPA shell) and
//! request helpers driving the real application router, so integration
//! tests exercise the same table production uses.

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use personalsite::bootstrap::app_context::AppContext;
use personalsite::bootstrap::config::Config;
use personalsite::presentation::http::router::app_router;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub const SHELL_HTML: &str = "<!doctype html><html><head><title>personalsite</title></head><body><div id=\"app\"></div></body></html>\n";

pub fn hash_password(password: &str) -> String {
    use argon2::password_hash::{SaltString, rand_core::OsRng};
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

/// A throwaway site tree:
///
/// ```text
/// <tmp>/media/documents/notes.md
/// <tmp>/media/documents/reports/q3-summary.pdf
/// <tmp>/media/galleries/home/cat.png
/// <tmp>/media/galleries/travel/beach.jpg
/// <tmp>/media/galleries/travel/notes.txt   (not an image)
/// <tmp>/dist/index.html
/// <tmp>/secret.txt                         (outside the media root)
/// ```
pub struct TestSite {
    dir: tempfile::TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::create_dir_all(root.join("media/documents/reports")).unwrap();
        std::fs::create_dir_all(root.join("media/galleries/travel")).unwrap();
        std::fs::create_dir_all(root.join("media/galleries/home")).unwrap();
        std::fs::create_dir_all(root.join("dist")).unwrap();

        std::fs::write(root.join("media/documents/notes.md"), b"# Notes\n").unwrap();
        std::fs::write(
            root.join("media/documents/reports/q3-summary.pdf"),
            b"%PDF-1.7 quarterly summary",
        )
        .unwrap();
        std::fs::write(
            root.join("media/galleries/travel/beach.jpg"),
            b"\xff\xd8\xff\xe0 jpeg bytes",
        )
        .unwrap();
        std::fs::write(root.join("media/galleries/travel/notes.txt"), b"not an image").unwrap();
        std::fs::write(root.join("media/galleries/home/cat.png"), b"\x89PNG png bytes").unwrap();
        std::fs::write(root.join("dist/index.html"), SHELL_HTML).unwrap();
        std::fs::write(root.join("secret.txt"), b"outside the media root").unwrap();

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self, debug: bool) -> Config {
        Config {
            api_port: 0,
            debug,
            frontend_url: Some("http://localhost:5173".to_string()),
            jwt_secret: "test-secret-not-for-production".to_string(),
            access_token_secs: 3600,
            refresh_token_secs: 86_400,
            admin_username: "admin".to_string(),
            admin_password_hash: Some(hash_password(TEST_PASSWORD)),
            media_url: "/media".to_string(),
            media_root: self.path().join("media").display().to_string(),
            index_file: self.path().join("dist/index.html").display().to_string(),
            site_name: "personalsite".to_string(),
            owner_name: Some("Site Owner".to_string()),
            owner_email: Some("owner@example.com".to_string()),
        }
    }

    pub fn app(&self, debug: bool) -> Router {
        app_router(AppContext::new(self.config(debug)))
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

/// Log in as the owner and return the `(refresh, access)` pair.
pub async fn login_tokens(site: &TestSite) -> (String, String) {
    let resp = post_json(
        site.app(true),
        "/api/users/login",
        serde_json::json!({ "username": "admin", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    (
        json["refresh"].as_str().unwrap().to_string(),
        json["access"].as_str().unwrap().to_string(),
    )
}
