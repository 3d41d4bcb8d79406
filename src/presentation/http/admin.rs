//! Administrative console. There is no framework-provided admin here, so
//! this is a small bearer-guarded operational surface for the site owner.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::auth::{self, Bearer};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStatusResponse {
    pub site: String,
    pub version: &'static str,
    pub debug: bool,
    pub uptime_secs: u64,
    /// "direct" when this process serves media itself (debug mode),
    /// "delegated" when an external layer owns the media prefix.
    pub media_serving: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminConfigResponse {
    pub media_url: String,
    pub media_root: String,
    pub index_file: String,
    pub frontend_url: Option<String>,
    pub access_token_secs: i64,
    pub refresh_token_secs: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/config", get(config))
        .with_state(ctx)
}

fn require_admin(cfg: &Config, bearer: Bearer) -> Result<(), StatusCode> {
    let sub = auth::validate_bearer(cfg, bearer)?;
    if sub != cfg.admin_username {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(())
}

#[utoipa::path(get, path = "/admin/status", tag = "Admin", responses(
    (status = 200, body = AdminStatusResponse),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn status(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<AdminStatusResponse>, StatusCode> {
    require_admin(&ctx.cfg, bearer)?;
    Ok(Json(AdminStatusResponse {
        site: ctx.cfg.site_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        debug: ctx.cfg.debug,
        uptime_secs: ctx.uptime_secs(),
        media_serving: if ctx.cfg.debug { "direct" } else { "delegated" },
    }))
}

/// Redacted runtime configuration: paths and lifetimes only, never secrets.
#[utoipa::path(get, path = "/admin/config", tag = "Admin", responses(
    (status = 200, body = AdminConfigResponse),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn config(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<AdminConfigResponse>, StatusCode> {
    require_admin(&ctx.cfg, bearer)?;
    Ok(Json(AdminConfigResponse {
        media_url: ctx.cfg.media_url.clone(),
        media_root: ctx.cfg.media_root.clone(),
        index_file: ctx.cfg.index_file.clone(),
        frontend_url: ctx.cfg.frontend_url.clone(),
        access_token_secs: ctx.cfg.access_token_secs,
        refresh_token_secs: ctx.cfg.refresh_token_secs,
    }))
}
