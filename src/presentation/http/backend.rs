//! Generic backend sub-application: liveness and site metadata.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SiteInfoResponse {
    pub site: String,
    pub version: &'static str,
    pub debug: bool,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(site_info))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/backend/health", tag = "Backend", responses(
    (status = 200, body = HealthResponse)
))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[utoipa::path(get, path = "/backend/info", tag = "Backend", responses(
    (status = 200, body = SiteInfoResponse)
))]
pub async fn site_info(State(ctx): State<AppContext>) -> Json<SiteInfoResponse> {
    Json(SiteInfoResponse {
        site: ctx.cfg.site_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        debug: ctx.cfg.debug,
    })
}
