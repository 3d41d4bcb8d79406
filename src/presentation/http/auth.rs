//! JWT glue around the `jsonwebtoken` crate: claims, minting, validation,
//! the `Bearer` extractor, and the root-level token-refresh endpoint. The
//! refresh protocol itself is the library's; handlers elsewhere only consume
//! [`validate_bearer`].

use axum::{Json, extract::State, http::StatusCode};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub token_type: String,
}

pub fn issue_token(
    cfg: &Config,
    sub: &str,
    token_type: &str,
    lifetime_secs: i64,
) -> Result<String, StatusCode> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + lifetime_secs) as usize,
        token_type: token_type.to_string(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn decode_token(cfg: &Config, token: &str, expected_type: &str) -> Result<Claims, StatusCode> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;
    if data.claims.token_type != expected_type {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(data.claims)
}

/// Validate an access token and return its subject.
pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<String, StatusCode> {
    decode_token(cfg, &bearer.0, TOKEN_TYPE_ACCESS).map(|c| c.sub)
}

// --- Bearer extractor ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|t| Bearer(t.to_string()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

// --- Token refresh endpoint ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

#[utoipa::path(post, path = "/api/token/refresh", tag = "Auth", request_body = RefreshRequest, responses(
    (status = 200, body = RefreshResponse),
    (status = 401, description = "Invalid or expired refresh token")
))]
pub async fn refresh_token(
    State(ctx): State<AppContext>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let claims = decode_token(&ctx.cfg, &req.refresh, TOKEN_TYPE_REFRESH)?;
    let access = issue_token(
        &ctx.cfg,
        &claims.sub,
        TOKEN_TYPE_ACCESS,
        ctx.cfg.access_token_secs,
    )?;
    Ok(Json(RefreshResponse { access }))
}
