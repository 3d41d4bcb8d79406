//! Root routing table. Binds each URL prefix to its sub-application router
//! and, in debug mode only, serves the media tree directly. Built once at
//! startup; both `main` and the integration tests assemble the application
//! through [`app_router`].

use axum::extract::MatchedPath;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::{admin, auth, backend, documents, photos, spa, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::users::login,
        crate::presentation::http::users::me,
        crate::presentation::http::auth::refresh_token,
        crate::presentation::http::documents::list_documents,
        crate::presentation::http::documents::download_document,
        crate::presentation::http::documents::list_categories,
        crate::presentation::http::photos::list_galleries,
        crate::presentation::http::photos::get_gallery,
        crate::presentation::http::photos::list_images,
        crate::presentation::http::backend::health,
        crate::presentation::http::backend::site_info,
        crate::presentation::http::admin::status,
        crate::presentation::http::admin::config,
    ),
    components(schemas(
        crate::presentation::http::users::LoginRequest,
        crate::presentation::http::users::TokenPairResponse,
        crate::presentation::http::users::OwnerResponse,
        crate::presentation::http::auth::RefreshRequest,
        crate::presentation::http::auth::RefreshResponse,
        crate::presentation::http::documents::DocumentEntry,
        crate::presentation::http::documents::DocumentListResponse,
        crate::presentation::http::documents::CategoryEntry,
        crate::presentation::http::documents::CategoryListResponse,
        crate::presentation::http::photos::GalleryEntry,
        crate::presentation::http::photos::GalleryListResponse,
        crate::presentation::http::photos::ImageEntry,
        crate::presentation::http::photos::GalleryDetailResponse,
        crate::presentation::http::photos::ImageListResponse,
        crate::presentation::http::backend::HealthResponse,
        crate::presentation::http::backend::SiteInfoResponse,
        crate::presentation::http::admin::AdminStatusResponse,
        crate::presentation::http::admin::AdminConfigResponse,
    )),
    tags(
        (name = "Users", description = "Owner account"),
        (name = "Auth", description = "Token refresh"),
        (name = "Documents", description = "Document catalog"),
        (name = "Photos", description = "Photo galleries"),
        (name = "Backend", description = "Liveness and site metadata"),
        (name = "Admin", description = "Operational console")
    )
)]
pub struct ApiDoc;

pub async fn openapi_schema() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Assemble the application router from the route table.
///
/// The media mount is appended only when `cfg.debug` is true; in production
/// the media prefix is owned by an external serving layer and falls through
/// to 404 here.
pub fn app_router(ctx: AppContext) -> Router {
    let cors = build_cors(&ctx.cfg);

    let mut app = Router::new()
        .nest("/admin", admin::routes(ctx.clone()))
        .route(
            "/api/token/refresh",
            post(auth::refresh_token).with_state(ctx.clone()),
        )
        .nest("/api/users", users::routes(ctx.clone()))
        .nest("/api/documents", documents::routes(ctx.clone()))
        .nest("/api/photos", photos::routes(ctx.clone()))
        .nest("/backend", backend::routes(ctx.clone()))
        .route("/api/schema", get(openapi_schema))
        .route("/", get(spa::index).with_state(ctx.clone()));

    if ctx.cfg.debug {
        app = app.nest_service(&ctx.cfg.media_url, ServeDir::new(&ctx.cfg.media_root));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
            let method = req.method().clone();
            let uri = req.uri().clone();
            let matched = req
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            tracing::info_span!("http", %method, %uri, matched_path = %matched)
        }),
    )
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];

    match cfg
        .frontend_url
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        None if cfg.debug => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        // Production requires FRONTEND_URL (enforced at startup); deny all
        // if we somehow get here without one.
        None => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
            .allow_methods(methods)
            .allow_headers(headers),
    }
}
