//! Users sub-application. A personal site has exactly one account — the
//! owner — so login verifies the configured admin credentials and `me`
//! returns the owner profile.

use argon2::{Argon2, PasswordVerifier};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use password_hash::PasswordHash;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{self, Bearer, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerResponse {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/users/login", tag = "Users", request_body = LoginRequest, responses(
    (status = 200, body = TokenPairResponse),
    (status = 401, description = "Unknown user or wrong password")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, StatusCode> {
    if req.username != ctx.cfg.admin_username {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let hash = ctx
        .cfg
        .admin_password_hash
        .as_deref()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let parsed = PasswordHash::new(hash).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed)
        .is_err()
    {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let refresh = auth::issue_token(
        &ctx.cfg,
        &req.username,
        TOKEN_TYPE_REFRESH,
        ctx.cfg.refresh_token_secs,
    )?;
    let access = auth::issue_token(
        &ctx.cfg,
        &req.username,
        TOKEN_TYPE_ACCESS,
        ctx.cfg.access_token_secs,
    )?;
    Ok(Json(TokenPairResponse { refresh, access }))
}

#[utoipa::path(get, path = "/api/users/me", tag = "Users", responses(
    (status = 200, body = OwnerResponse),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<OwnerResponse>, StatusCode> {
    let sub = auth::validate_bearer(&ctx.cfg, bearer)?;
    if sub != ctx.cfg.admin_username {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(OwnerResponse {
        username: sub,
        name: ctx.cfg.owner_name.clone(),
        email: ctx.cfg.owner_email.clone(),
    }))
}
